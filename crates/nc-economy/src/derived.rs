//! Derived stats recomputed after every trait write.
//!
//! Willpower follows Composure + Resolve. A werewolf's `total_renown`
//! follows Honor + Wisdom + Glory. Both are stored eagerly so reads never
//! have to derive them.

use nc_core::names::{self, RENOWN_SOURCES, WILLPOWER_SOURCES};
use nc_core::{CharacterClass, CharacterId, CharacterTrait, Store};
use tracing::debug;

use crate::error::{EconomyError, EconomyResult};

/// Which derived stat a write touched, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recomputed {
    /// Nothing depends on the written trait.
    Nothing,
    /// Willpower was set to this value.
    Willpower(u32),
    /// `total_renown` was set to this value.
    TotalRenown(u32),
}

/// Recompute whatever depends on the trait `assignment` rates.
pub async fn after_save<S: Store + ?Sized>(
    store: &S,
    assignment: &CharacterTrait,
) -> EconomyResult<Recomputed> {
    let Some(def) = store.trait_by_id(assignment.trait_id).await? else {
        return Err(EconomyError::missing("trait", assignment.trait_id));
    };
    if names::is_one_of(&def.name, &WILLPOWER_SOURCES) {
        return recompute_willpower(store, assignment.character_id).await;
    }
    if names::is_one_of(&def.name, &RENOWN_SOURCES) {
        return recompute_total_renown(store, assignment.character_id).await;
    }
    Ok(Recomputed::Nothing)
}

/// Sum of the character's ratings in the named traits.
async fn sum_named<S: Store + ?Sized>(
    store: &S,
    character_id: CharacterId,
    trait_names: &[&str],
) -> EconomyResult<u32> {
    let mut total = 0;
    for assignment in store.assignments_for_character(character_id).await? {
        let Some(def) = store.trait_by_id(assignment.trait_id).await? else {
            continue;
        };
        if names::is_one_of(&def.name, trait_names) {
            total += assignment.value;
        }
    }
    Ok(total)
}

/// Set Willpower to Composure + Resolve, creating the assignment if needed.
///
/// The sum is clamped into Willpower's own bounds.
pub async fn recompute_willpower<S: Store + ?Sized>(
    store: &S,
    character_id: CharacterId,
) -> EconomyResult<Recomputed> {
    let willpower = store
        .trait_by_name(names::WILLPOWER)
        .await?
        .ok_or_else(|| EconomyError::missing("trait", names::WILLPOWER))?;
    let value = willpower.clamp(sum_named(store, character_id, &WILLPOWER_SOURCES).await?);

    match store.find_assignment(character_id, willpower.id).await? {
        Some(mut existing) => {
            existing.value = value;
            store.update_assignment(&existing).await?;
        }
        None => {
            store
                .insert_assignment(CharacterTrait::new(character_id, willpower.id, value))
                .await?;
        }
    }
    debug!(%character_id, value, "recomputed willpower");
    Ok(Recomputed::Willpower(value))
}

/// Store Honor + Wisdom + Glory on a werewolf's bundle. No-op for other classes.
pub async fn recompute_total_renown<S: Store + ?Sized>(
    store: &S,
    character_id: CharacterId,
) -> EconomyResult<Recomputed> {
    let mut character = store
        .character(character_id)
        .await?
        .ok_or_else(|| EconomyError::missing("character", character_id))?;
    if character.character_class != CharacterClass::Werewolf {
        return Ok(Recomputed::Nothing);
    }
    let total = sum_named(store, character_id, &RENOWN_SOURCES).await?;
    character.werewolf_attributes.total_renown = total;
    store.update_character(&character).await?;
    debug!(%character_id, total, "recomputed total renown");
    Ok(Recomputed::TotalRenown(total))
}
