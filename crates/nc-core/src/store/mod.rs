//! Repository ports the engine reads and writes through.
//!
//! Four narrow traits mirror the persistence collaborators: the trait
//! catalog, characters, trait assignments and experience wallets. Updates
//! are compare-and-swap on the document's `version`; a mismatch is a
//! [`CoreError::StaleWrite`](crate::CoreError::StaleWrite).

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::id::{
    AdvantageCategoryId, AssignmentId, AuspiceId, CampaignId, CategoryId, CharacterId, ClanId,
    ConceptId, EdgeId, PerkId, TraitId, TribeId, UserId,
};
use crate::model::{
    AdvantageCategory, CampaignExperience, Character, CharacterClass, CharacterConcept,
    CharacterTrait, GameVersion, HunterEdge, HunterEdgePerk, SheetSection, TraitCategory,
    TraitDefinition, VampireClan, WerewolfAuspice, WerewolfGift, WerewolfRite, WerewolfTribe,
};

/// Filter for trait lookups. Empty/`None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TraitFilter {
    /// Only traits in one of these categories.
    pub category_ids: Vec<CategoryId>,
    /// Only traits applying to this class.
    pub character_class: Option<CharacterClass>,
    /// Only traits appearing in this version.
    pub game_version: Option<GameVersion>,
    /// Include archived traits.
    pub include_archived: bool,
    /// Include character-scoped custom traits.
    pub include_custom: bool,
}

impl TraitFilter {
    /// Traits in the given categories.
    pub fn in_categories(ids: impl IntoIterator<Item = CategoryId>) -> Self {
        Self {
            category_ids: ids.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Restrict to a class.
    pub fn for_class(mut self, class: CharacterClass) -> Self {
        self.character_class = Some(class);
        self
    }

    /// Restrict to a game version.
    pub fn for_version(mut self, version: GameVersion) -> Self {
        self.game_version = Some(version);
        self
    }

    /// Returns true if `def` passes the filter.
    pub fn matches(&self, def: &TraitDefinition) -> bool {
        (self.category_ids.is_empty() || self.category_ids.contains(&def.category_id))
            && self
                .character_class
                .is_none_or(|c| def.applies_to_class(c))
            && self.game_version.is_none_or(|v| def.applies_to_version(v))
            && (self.include_archived || !def.is_archived)
            && (self.include_custom || def.custom_for_character_id.is_none())
    }
}

/// Filter for category lookups. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    /// Only categories in this sheet section.
    pub section: Option<SheetSection>,
    /// Only categories applying to this class.
    pub character_class: Option<CharacterClass>,
    /// Only categories appearing in this version.
    pub game_version: Option<GameVersion>,
    /// Include archived categories.
    pub include_archived: bool,
}

impl CategoryFilter {
    /// Categories in a sheet section.
    pub fn in_section(section: SheetSection) -> Self {
        Self {
            section: Some(section),
            ..Self::default()
        }
    }

    /// Restrict to a class.
    pub fn for_class(mut self, class: CharacterClass) -> Self {
        self.character_class = Some(class);
        self
    }

    /// Restrict to a game version.
    pub fn for_version(mut self, version: GameVersion) -> Self {
        self.game_version = Some(version);
        self
    }

    /// Returns true if `cat` passes the filter.
    pub fn matches(&self, cat: &TraitCategory) -> bool {
        self.section.is_none_or(|s| cat.section == s)
            && self
                .character_class
                .is_none_or(|c| cat.character_classes.contains(&c))
            && self
                .game_version
                .is_none_or(|v| cat.game_versions.contains(&v))
            && (self.include_archived || !cat.is_archived)
    }
}

/// Read access to the catalog, plus insertion of custom traits.
///
/// List methods return only non-archived documents.
#[async_trait]
pub trait TraitCatalog: Send + Sync {
    /// A trait by id, custom or not.
    async fn trait_by_id(&self, id: TraitId) -> CoreResult<Option<TraitDefinition>>;
    /// A non-custom trait by name, ignoring case.
    async fn trait_by_name(&self, name: &str) -> CoreResult<Option<TraitDefinition>>;
    /// Traits passing `filter`.
    async fn find_traits(&self, filter: &TraitFilter) -> CoreResult<Vec<TraitDefinition>>;
    /// Persist a new (custom) trait definition.
    async fn insert_trait(&self, def: TraitDefinition) -> CoreResult<()>;

    /// A category by id.
    async fn category_by_id(&self, id: CategoryId) -> CoreResult<Option<TraitCategory>>;
    /// A category by name, ignoring case.
    async fn category_by_name(&self, name: &str) -> CoreResult<Option<TraitCategory>>;
    /// Categories passing `filter`.
    async fn find_categories(&self, filter: &CategoryFilter) -> CoreResult<Vec<TraitCategory>>;
    /// An advantage category by id.
    async fn advantage_category(
        &self,
        id: AdvantageCategoryId,
    ) -> CoreResult<Option<AdvantageCategory>>;

    /// A clan by id.
    async fn clan(&self, id: ClanId) -> CoreResult<Option<VampireClan>>;
    /// Active clans.
    async fn clans(&self) -> CoreResult<Vec<VampireClan>>;
    /// A tribe by id.
    async fn tribe(&self, id: TribeId) -> CoreResult<Option<WerewolfTribe>>;
    /// Active tribes.
    async fn tribes(&self) -> CoreResult<Vec<WerewolfTribe>>;
    /// An auspice by id.
    async fn auspice(&self, id: AuspiceId) -> CoreResult<Option<WerewolfAuspice>>;
    /// Active auspices.
    async fn auspices(&self) -> CoreResult<Vec<WerewolfAuspice>>;
    /// Active gifts.
    async fn gifts(&self) -> CoreResult<Vec<WerewolfGift>>;
    /// Active rites.
    async fn rites(&self) -> CoreResult<Vec<WerewolfRite>>;
    /// An edge by id.
    async fn edge(&self, id: EdgeId) -> CoreResult<Option<HunterEdge>>;
    /// Active edges.
    async fn edges(&self) -> CoreResult<Vec<HunterEdge>>;
    /// A perk by id.
    async fn perk(&self, id: PerkId) -> CoreResult<Option<HunterEdgePerk>>;
    /// A concept by id.
    async fn concept(&self, id: ConceptId) -> CoreResult<Option<CharacterConcept>>;
    /// Active concepts.
    async fn concepts(&self) -> CoreResult<Vec<CharacterConcept>>;
}

/// Character persistence.
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// A character by id.
    async fn character(&self, id: CharacterId) -> CoreResult<Option<Character>>;
    /// Persist a new character.
    async fn insert_character(&self, character: Character) -> CoreResult<()>;
    /// Compare-and-swap update; returns the stored copy with its new version.
    async fn update_character(&self, character: &Character) -> CoreResult<Character>;
    /// Returns true if a character already uses this exact name.
    async fn name_taken(&self, first: &str, last: &str) -> CoreResult<bool>;
}

/// Character-trait assignment persistence.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// An assignment by id.
    async fn assignment(&self, id: AssignmentId) -> CoreResult<Option<CharacterTrait>>;
    /// The assignment of `trait_id` on `character_id`, if any.
    async fn find_assignment(
        &self,
        character_id: CharacterId,
        trait_id: TraitId,
    ) -> CoreResult<Option<CharacterTrait>>;
    /// Every assignment of a character.
    async fn assignments_for_character(
        &self,
        character_id: CharacterId,
    ) -> CoreResult<Vec<CharacterTrait>>;
    /// Persist a new assignment; rejects a second one for the same pair.
    async fn insert_assignment(&self, assignment: CharacterTrait) -> CoreResult<CharacterTrait>;
    /// Compare-and-swap update; returns the stored copy with its new version.
    async fn update_assignment(&self, assignment: &CharacterTrait) -> CoreResult<CharacterTrait>;
    /// Delete an assignment.
    async fn delete_assignment(&self, id: AssignmentId) -> CoreResult<()>;
}

/// Experience wallet persistence.
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// The wallet for (user, campaign), if one was ever saved.
    async fn wallet(
        &self,
        user_id: UserId,
        campaign_id: CampaignId,
    ) -> CoreResult<Option<CampaignExperience>>;
    /// Compare-and-swap save. A wallet with version 0 is inserted.
    async fn save_wallet(&self, wallet: &CampaignExperience) -> CoreResult<CampaignExperience>;
}

/// Everything the engine needs from persistence.
pub trait Store: TraitCatalog + CharacterStore + AssignmentStore + WalletStore {}

impl<T> Store for T where T: TraitCatalog + CharacterStore + AssignmentStore + WalletStore {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_filter_defaults_hide_archived_and_custom() {
        let cat = CategoryId::new();
        let mut def = TraitDefinition::new("Strength", cat, 1, 5).unwrap();
        let filter = TraitFilter::in_categories([cat]);
        assert!(filter.matches(&def));

        def.is_archived = true;
        assert!(!filter.matches(&def));

        def.is_archived = false;
        def.custom_for_character_id = Some(CharacterId::new());
        assert!(!filter.matches(&def));
        assert!(
            TraitFilter {
                include_custom: true,
                ..filter.clone()
            }
            .matches(&def)
        );
    }

    #[test]
    fn trait_filter_class_and_version() {
        let def = TraitDefinition::new("Auspex", CategoryId::new(), 0, 5)
            .unwrap()
            .for_classes(&[CharacterClass::Vampire]);
        assert!(TraitFilter::default().for_class(CharacterClass::Vampire).matches(&def));
        assert!(!TraitFilter::default().for_class(CharacterClass::Hunter).matches(&def));
        assert!(TraitFilter::default().for_version(GameVersion::V4).matches(&def));
    }

    #[test]
    fn category_filter_section() {
        let cat = TraitCategory::new("Physical", SheetSection::Attributes);
        assert!(CategoryFilter::in_section(SheetSection::Attributes).matches(&cat));
        assert!(!CategoryFilter::in_section(SheetSection::Abilities).matches(&cat));
    }
}
