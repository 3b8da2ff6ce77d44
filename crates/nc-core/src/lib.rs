//! Core types for Nocturne: the character-sheet data model shared by the
//! trait economy and the character generator.
//!
//! This crate defines trait definitions and their per-character assignments,
//! characters with their supernatural attribute bundles, campaign experience
//! wallets, and the catalog of clans, tribes, gifts, edges and the like. It
//! also declares the repository ports the engine persists through, with an
//! in-memory implementation in [`store::MemoryStore`].

/// Error types used throughout the crate.
pub mod error;
/// Strongly typed identifiers for every stored document.
pub mod id;
/// Documents: traits, characters, wallets and catalog items.
pub mod model;
/// Well-known trait and category names the engine looks up.
pub mod names;
/// A small, complete sample catalog for demos and tests.
pub mod seed;
/// Repository ports and the in-memory store.
pub mod store;

/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export identifier types.
pub use id::{
    AdvantageCategoryId, AssignmentId, AuspiceId, CampaignId, CategoryId, CharacterId, ClanId,
    ConceptId, EdgeId, GiftId, PerkId, RiteId, TraitId, TribeId, UserId,
};
/// Re-export the most used model types.
pub use model::{
    CampaignExperience, Catalog, Character, CharacterClass, CharacterTrait, CharacterType,
    GameVersion, HunterCreed, Renown, SheetSection, TraitCategory, TraitDefinition,
};
/// Re-export store ports.
pub use store::{
    AssignmentStore, CharacterStore, MemoryStore, Store, TraitCatalog, WalletStore,
};
