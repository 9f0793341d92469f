//! Core business logic for Indicata.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All record types, share rules, and the data-entry wizards live here.
//!
//! # Modules
//!
//! - `shares` - Percentage bounds, sum-to-100 and sub-sector taxonomy rules
//! - `records` - Sector share, period amount and target records
//! - `wizard` - Step-gated data-entry state machine and its forms
//! - `gateway` - The record gateway contract and an in-memory implementation

pub mod gateway;
pub mod records;
pub mod shares;
pub mod wizard;
