//! Catalog and store lookups that generation cannot proceed without.

use nc_core::store::TraitFilter;
use nc_core::{Character, CharacterId, Store, TraitCategory, TraitDefinition};

use crate::error::{ChargenError, ChargenResult};

/// A trait definition by name, or a missing-reference error.
pub(crate) async fn trait_named<S: Store + ?Sized>(
    store: &S,
    name: &str,
) -> ChargenResult<TraitDefinition> {
    store
        .trait_by_name(name)
        .await?
        .ok_or_else(|| ChargenError::missing("trait", name))
}

/// A category by name, or a missing-reference error.
pub(crate) async fn category_named<S: Store + ?Sized>(
    store: &S,
    name: &str,
) -> ChargenResult<TraitCategory> {
    store
        .category_by_name(name)
        .await?
        .ok_or_else(|| ChargenError::missing("trait category", name))
}

/// Non-archived, non-custom traits in `categories` usable by `character`.
pub(crate) async fn traits_for<S: Store + ?Sized>(
    store: &S,
    character: &Character,
    categories: impl IntoIterator<Item = nc_core::CategoryId>,
) -> ChargenResult<Vec<TraitDefinition>> {
    let filter = TraitFilter::in_categories(categories)
        .for_class(character.character_class)
        .for_version(character.game_version);
    Ok(store.find_traits(&filter).await?)
}

/// Fresh copy of a character, picking up versions bumped by recompute hooks.
pub(crate) async fn reload<S: Store + ?Sized>(
    store: &S,
    id: CharacterId,
) -> ChargenResult<Character> {
    store
        .character(id)
        .await?
        .ok_or_else(|| ChargenError::missing("character", id))
}
