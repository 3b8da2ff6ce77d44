//! The character-sheet data model.

pub mod catalog;
pub mod character;
pub mod kind;
pub mod trait_def;
pub mod wallet;

pub use catalog::{
    Catalog, CharacterConcept, HunterEdge, HunterEdgePerk, VampireClan, WerewolfAuspice,
    WerewolfGift, WerewolfRite, WerewolfTribe,
};
pub use character::{
    Character, HunterAttributes, HunterEdgeAssignment, MageAttributes, VampireAttributes,
    WerewolfAttributes,
};
pub use kind::{CharacterClass, CharacterType, GameVersion, HunterCreed, Renown};
pub use trait_def::{AdvantageCategory, CharacterTrait, SheetSection, TraitCategory, TraitDefinition};
pub use wallet::CampaignExperience;
