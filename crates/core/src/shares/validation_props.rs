//! Property-based tests for share validation rules.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::ValidationError;
use super::taxonomy::{Sector, SubDetail};
use super::validation::{
    SUM_TOLERANCE, validate_percentage, validate_subsector_keys, validate_sum_to_100,
};

/// Strategy to generate a percentage in [0, 100] with up to 2 dp.
fn percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a percentage with 3 dp, to exercise the tolerance edge.
fn fine_percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=100_000i64).prop_map(|mills| Decimal::new(mills, 3))
}

/// Strategy to pick a valid services sub-sector name.
fn services_key() -> impl Strategy<Value = String> {
    prop::sample::select(Sector::Services.subsectors()).prop_map(str::to_string)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* four shares in [0, 100], the sum check succeeds iff the
    /// sum is within 0.01 of 100.
    #[test]
    fn prop_sum_invariant(
        s in fine_percentage(),
        i in fine_percentage(),
        a in fine_percentage(),
        t in fine_percentage(),
    ) {
        let sum = s + i + a + t;
        let within = (sum - Decimal::ONE_HUNDRED).abs() <= SUM_TOLERANCE;
        let result = validate_sum_to_100(&[s, i, a, t], SUM_TOLERANCE);

        prop_assert_eq!(result.is_ok(), within);
        if let Err(ValidationError::SumMismatch { actual, .. }) = result {
            prop_assert_eq!(actual, sum);
        }
    }

    /// *For any* three shares whose sum leaves a remainder in [0, 100], the
    /// remainder completes a valid decomposition.
    #[test]
    fn prop_complement_is_accepted(
        s in percentage(),
        i in percentage(),
        a in percentage(),
    ) {
        let t = Decimal::ONE_HUNDRED - s - i - a;
        prop_assume!(t >= Decimal::ZERO);
        prop_assert!(validate_sum_to_100(&[s, i, a, t], SUM_TOLERANCE).is_ok());
    }

    /// *For any* value in [0, 100], the percentage check accepts it; any
    /// value pushed above 100 is rejected.
    #[test]
    fn prop_percentage_bounds(p in percentage(), excess in 1i64..10_000i64) {
        prop_assert!(validate_percentage("share", p).is_ok());
        let above = Decimal::ONE_HUNDRED + Decimal::new(excess, 2);
        prop_assert!(validate_percentage("share", above).is_err());
        prop_assert!(validate_percentage("share", -Decimal::new(excess, 2)).is_err());
    }

    /// *For any* map of whitelisted keys plus one foreign key, exactly the
    /// foreign key is reported.
    #[test]
    fn prop_taxonomy_reports_only_foreign_keys(
        keys in prop::collection::vec(services_key(), 0..5),
        value in percentage(),
        foreign in "[a-z]{3,10}",
    ) {
        let mut map: BTreeMap<String, Decimal> =
            keys.into_iter().map(|k| (k, value)).collect();
        map.insert(foreign.clone(), value);

        let result =
            validate_subsector_keys("servicesSubShares", &map, Sector::Services, SubDetail::Optional);
        prop_assert_eq!(
            result,
            Err(ValidationError::InvalidKey {
                field: "servicesSubShares".to_string(),
                keys: vec![foreign],
            })
        );
    }
}
