//! Property-based tests for wizard navigation.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::machine::{StepWizard, WizardForm};
use super::sector::SectorShareForm;

/// A navigation action.
#[derive(Debug, Clone, Copy)]
enum Action {
    Next,
    Previous,
    Reset,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Next), Just(Action::Previous), Just(Action::Reset)]
}

/// Strategy to generate an optional decimal, sometimes out of range.
fn maybe_decimal() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::of((-5_000i64..=20_000i64).prop_map(|cents| Decimal::new(cents, 2)))
}

/// Strategy to generate a partially filled sector form.
fn sector_form() -> impl Strategy<Value = SectorShareForm> {
    (
        maybe_decimal(),
        maybe_decimal(),
        maybe_decimal(),
        maybe_decimal(),
        maybe_decimal(),
    )
        .prop_map(|(total, services, agriculture, taxes, industry)| SectorShareForm {
            total_gdp: total,
            services_share: services,
            agriculture_share: agriculture,
            taxes_share: taxes,
            industry_share: industry,
            ..SectorShareForm::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* data and navigation history, the step stays in [1, N].
    #[test]
    fn prop_step_stays_in_bounds(
        form in sector_form(),
        actions in prop::collection::vec(action(), 0..20),
    ) {
        let mut wizard = StepWizard::<SectorShareForm>::new();
        wizard.update(|f| *f = form.clone());

        for action in actions {
            match action {
                Action::Next => { let _ = wizard.next(); }
                Action::Previous => { wizard.previous(); }
                Action::Reset => wizard.reset(),
            }
            prop_assert!((1..=SectorShareForm::STEPS).contains(&wizard.current_step()));
        }
    }

    /// *For any* data, a rejected `next` changes neither the step nor the
    /// data, and an accepted one moves exactly one step.
    #[test]
    fn prop_next_is_gated(form in sector_form()) {
        let mut wizard = StepWizard::<SectorShareForm>::new();
        wizard.update(|f| *f = form.clone());

        let passes = wizard.check_current().is_ok();
        let result = wizard.next();

        prop_assert_eq!(result.is_ok(), passes);
        prop_assert_eq!(wizard.current_step(), if passes { 2 } else { 1 });
        prop_assert_eq!(wizard.form(), &form);
    }

    /// *For any* reachable state, reset yields step 1 and the empty form.
    #[test]
    fn prop_reset_is_idempotent(
        form in sector_form(),
        forward in 0usize..4,
        resets in 1usize..3,
    ) {
        let mut wizard = StepWizard::<SectorShareForm>::new();
        wizard.update(|f| *f = form);
        for _ in 0..forward {
            let _ = wizard.next();
        }

        for _ in 0..resets {
            wizard.reset();
            prop_assert_eq!(wizard.current_step(), 1);
            prop_assert_eq!(wizard.form(), &SectorShareForm::default());
        }
    }
}
