//! Dot cost arithmetic.
//!
//! The step that reaches 1 costs the trait's `initial_cost`; every later step
//! costs `new_value * upgrade_cost`. Lowering mirrors this exactly, so raising
//! by `n` and then lowering by `n` nets to zero.

use std::collections::BTreeMap;

use nc_core::TraitDefinition;

use crate::error::{EconomyError, EconomyResult};

/// Cost of raising `def` from `current` by `increase_by` dots.
///
/// Fails on the first step that would exceed `max_value`, or if the total
/// does not fit in a `u32`.
pub fn upgrade_cost(def: &TraitDefinition, current: u32, increase_by: u32) -> EconomyResult<u32> {
    let mut cost: u32 = 0;
    let mut value = current;
    for _ in 0..increase_by {
        let next = match value.checked_add(1) {
            Some(next) if next <= def.max_value => next,
            _ => {
                return Err(EconomyError::validation(
                    "value",
                    format!(
                        "raising {} from {current} by {increase_by} exceeds max {}",
                        def.name, def.max_value
                    ),
                ));
            }
        };
        cost = accumulate(def, cost, step_cost(def, next)?)?;
        value = next;
    }
    Ok(cost)
}

/// XP returned by lowering `def` from `current` by `decrease_by` dots.
///
/// Fails on the first step that would drop below `min_value`, or if the
/// total does not fit in a `u32`.
pub fn downgrade_savings(
    def: &TraitDefinition,
    current: u32,
    decrease_by: u32,
) -> EconomyResult<u32> {
    let mut savings: u32 = 0;
    let mut value = current;
    for _ in 0..decrease_by {
        if value <= def.min_value {
            return Err(EconomyError::validation(
                "value",
                format!(
                    "lowering {} from {current} by {decrease_by} goes below min {}",
                    def.name, def.min_value
                ),
            ));
        }
        savings = accumulate(def, savings, step_cost(def, value)?)?;
        value -= 1;
    }
    Ok(savings)
}

/// Cumulative upgrade cost for every legal step count from `current`.
///
/// Keys run from 1 to `max_value - current`; empty at the cap.
pub fn all_upgrade_costs(def: &TraitDefinition, current: u32) -> EconomyResult<BTreeMap<u32, u32>> {
    let mut table = BTreeMap::new();
    if current >= def.max_value {
        return Ok(table);
    }
    let mut total: u32 = 0;
    for (value, steps) in (current + 1..=def.max_value).zip(1u32..) {
        total = accumulate(def, total, step_cost(def, value)?)?;
        table.insert(steps, total);
    }
    Ok(table)
}

/// Cumulative savings for every legal step count down from `current`.
///
/// Keys run from 1 to `current - min_value`; empty at the floor.
pub fn all_downgrade_savings(
    def: &TraitDefinition,
    current: u32,
) -> EconomyResult<BTreeMap<u32, u32>> {
    let mut table = BTreeMap::new();
    if current <= def.min_value {
        return Ok(table);
    }
    let mut total: u32 = 0;
    for (value, steps) in (def.min_value + 1..=current).rev().zip(1u32..) {
        total = accumulate(def, total, step_cost(def, value)?)?;
        table.insert(steps, total);
    }
    Ok(table)
}

/// Check that every cost in `def`'s full range fits in a `u32`.
///
/// The most expensive path is `min_value` to `max_value`; every other raise
/// or lowering is a part of it.
pub fn check_cost_range(def: &TraitDefinition) -> EconomyResult<()> {
    upgrade_cost(def, def.min_value, def.max_value.saturating_sub(def.min_value)).map(|_| ())
}

/// Cost of the single step that lands on (or leaves) `value`.
fn step_cost(def: &TraitDefinition, value: u32) -> EconomyResult<u32> {
    if value == 1 {
        return Ok(def.initial_cost);
    }
    value
        .checked_mul(def.upgrade_cost)
        .ok_or_else(|| overflow(def))
}

fn accumulate(def: &TraitDefinition, total: u32, step: u32) -> EconomyResult<u32> {
    total.checked_add(step).ok_or_else(|| overflow(def))
}

fn overflow(def: &TraitDefinition) -> EconomyError {
    EconomyError::validation(
        "upgrade_cost",
        format!(
            "cost of {} (initial {}, upgrade {}) overflows",
            def.name, def.initial_cost, def.upgrade_cost
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use nc_core::CategoryId;
    use proptest::prelude::*;

    fn def(min: u32, max: u32, initial: u32, upgrade: u32) -> TraitDefinition {
        TraitDefinition::new("Auspex", CategoryId::new(), min, max)
            .unwrap()
            .with_costs(initial, upgrade)
    }

    #[test]
    fn cost_and_refund_are_symmetric() {
        let d = def(0, 5, 1, 2);
        assert_eq!(upgrade_cost(&d, 0, 3).unwrap(), 11);
        assert_eq!(downgrade_savings(&d, 3, 3).unwrap(), 11);
    }

    #[test]
    fn upgrade_past_max_fails() {
        let d = def(0, 3, 1, 2);
        let err = upgrade_cost(&d, 2, 2).unwrap_err();
        assert!(matches!(err, EconomyError::Validation { field: "value", .. }));
    }

    #[test]
    fn downgrade_below_min_fails() {
        let d = def(1, 5, 10, 5);
        assert!(downgrade_savings(&d, 2, 1).is_ok());
        assert!(downgrade_savings(&d, 2, 2).is_err());
    }

    #[test]
    fn zero_steps_cost_nothing() {
        let d = def(0, 5, 3, 3);
        assert_eq!(upgrade_cost(&d, 5, 0).unwrap(), 0);
        assert_eq!(downgrade_savings(&d, 0, 0).unwrap(), 0);
    }

    #[test]
    fn cost_tables() {
        let d = def(0, 4, 1, 2);
        let up = all_upgrade_costs(&d, 1).unwrap();
        assert_eq!(up.into_iter().collect::<Vec<_>>(), vec![(1, 4), (2, 10), (3, 18)]);

        let down = all_downgrade_savings(&d, 3).unwrap();
        assert_eq!(down.into_iter().collect::<Vec<_>>(), vec![(1, 6), (2, 10), (3, 11)]);

        assert!(all_upgrade_costs(&d, 4).unwrap().is_empty());
        assert!(all_downgrade_savings(&d, 0).unwrap().is_empty());
    }

    #[test]
    fn downgrade_table_stops_at_min() {
        let d = def(1, 5, 10, 5);
        let down = all_downgrade_savings(&d, 3).unwrap();
        assert_eq!(down.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn huge_upgrade_cost_is_an_error_not_a_wrap() {
        let d = def(0, 5, 1, 1 << 31);
        assert_eq!(upgrade_cost(&d, 0, 1).unwrap(), 1);
        let err = upgrade_cost(&d, 1, 1).unwrap_err();
        assert!(matches!(err, EconomyError::Validation { field: "upgrade_cost", .. }));
        assert!(downgrade_savings(&d, 2, 1).is_err());
        assert!(all_upgrade_costs(&d, 1).is_err());
        assert!(all_downgrade_savings(&d, 5).is_err());
        assert!(check_cost_range(&d).is_err());
    }

    #[test]
    fn sum_overflow_is_caught() {
        // every step fits, the total does not
        let d = def(0, 3, u32::MAX, 1);
        assert_eq!(upgrade_cost(&d, 0, 1).unwrap(), u32::MAX);
        assert!(upgrade_cost(&d, 0, 2).is_err());
        assert!(check_cost_range(&d).is_err());
        assert!(check_cost_range(&def(0, 5, 1, 2)).is_ok());
    }

    #[test]
    fn raising_from_u32_max_is_rejected() {
        let d = def(0, u32::MAX, 0, 0);
        assert!(upgrade_cost(&d, u32::MAX, 1).is_err());
        assert!(all_upgrade_costs(&d, u32::MAX).unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn costs_never_panic(
            max in 1u32..40,
            initial in any::<u32>(),
            upgrade in any::<u32>(),
        ) {
            let d = def(0, max, initial, upgrade);
            let wide = (2..=u64::from(max)).map(|v| v * u64::from(upgrade)).sum::<u64>()
                + u64::from(initial);
            match upgrade_cost(&d, 0, max) {
                Ok(cost) => prop_assert_eq!(u64::from(cost), wide),
                Err(_) => prop_assert!(wide > u64::from(u32::MAX)),
            }
            prop_assert_eq!(check_cost_range(&d).is_ok(), wide <= u64::from(u32::MAX));
        }

        #[test]
        fn raise_then_lower_nets_zero(
            max in 1u32..10,
            start in 0u32..10,
            by in 0u32..10,
            initial in 0u32..20,
            upgrade in 0u32..20,
        ) {
            let d = def(0, max, initial, upgrade);
            let start = start.min(max);
            let by = by.min(max - start);
            let cost = upgrade_cost(&d, start, by).unwrap();
            let savings = downgrade_savings(&d, start + by, by).unwrap();
            prop_assert_eq!(cost, savings);
        }

        #[test]
        fn tables_agree_with_single_calls(max in 1u32..8, start in 0u32..8) {
            let d = def(0, max, 2, 3);
            let start = start.min(max);
            for (steps, total) in all_upgrade_costs(&d, start).unwrap() {
                prop_assert_eq!(upgrade_cost(&d, start, steps).unwrap(), total);
            }
            for (steps, total) in all_downgrade_savings(&d, start).unwrap() {
                prop_assert_eq!(downgrade_savings(&d, start, steps).unwrap(), total);
            }
        }
    }
}
