//! Bound checks run before any trait-value write.

use nc_core::TraitDefinition;

use crate::error::{EconomyError, EconomyResult};

/// Check that `current + amount` stays within `max_value`; returns the new value.
pub fn guard_increase(def: &TraitDefinition, current: u32, amount: u32) -> EconomyResult<u32> {
    match current.checked_add(amount) {
        Some(next) if next <= def.max_value => Ok(next),
        _ => Err(EconomyError::validation(
            "value",
            format!(
                "{} cannot be raised above {} (current {current}, requested +{amount})",
                def.name, def.max_value
            ),
        )),
    }
}

/// Check that `current - amount` stays within `min_value`; returns the new value.
pub fn guard_decrease(def: &TraitDefinition, current: u32, amount: u32) -> EconomyResult<u32> {
    match current.checked_sub(amount) {
        Some(next) if next >= def.min_value => Ok(next),
        _ => Err(EconomyError::validation(
            "value",
            format!(
                "{} cannot be lowered below {} (current {current}, requested -{amount})",
                def.name, def.min_value
            ),
        )),
    }
}

/// Check that `value` lies within the trait's bounds.
pub fn guard_value(def: &TraitDefinition, value: u32) -> EconomyResult<u32> {
    if def.allows(value) {
        Ok(value)
    } else {
        Err(EconomyError::validation(
            "value",
            format!(
                "{value} is outside {}..={} for {}",
                def.min_value, def.max_value, def.name
            ),
        ))
    }
}
