//! Trait definitions, categories and per-character assignments.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::id::{AdvantageCategoryId, AssignmentId, CategoryId, CharacterId, TraitId};
use crate::model::kind::{CharacterClass, GameVersion};

/// Section of the character sheet a category is printed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetSection {
    /// Physical, Social and Mental attributes.
    Attributes,
    /// Skills and talents.
    Abilities,
    /// Backgrounds, merits and flaws.
    Advantages,
    /// Powers, tracks and everything else.
    Other,
}

/// A rateable trait in the catalog (Strength, Auspex, Resources, ...).
///
/// Costs follow the dot economy: the step from 0 to 1 costs `initial_cost`,
/// every later step costs `new_value * upgrade_cost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitDefinition {
    /// Unique identifier.
    pub id: TraitId,
    /// Display name.
    pub name: String,
    /// Owning category.
    pub category_id: CategoryId,
    /// Game versions this trait appears in.
    pub game_versions: Vec<GameVersion>,
    /// Classes this trait applies to.
    pub character_classes: Vec<CharacterClass>,
    /// Lowest legal rating.
    pub min_value: u32,
    /// Highest legal rating.
    pub max_value: u32,
    /// Cost of the 0 -> 1 step.
    pub initial_cost: u32,
    /// Per-dot multiplier for every step above 1.
    pub upgrade_cost: u32,
    /// True for character-scoped custom traits.
    #[serde(default)]
    pub is_custom: bool,
    /// Owning character, only set for custom traits.
    #[serde(default)]
    pub custom_for_character_id: Option<CharacterId>,
    /// Optional advantage category (merits, backgrounds and flaws only).
    #[serde(default)]
    pub advantage_category_id: Option<AdvantageCategoryId>,
    /// Archived traits are never offered to new characters.
    #[serde(default)]
    pub is_archived: bool,
}

impl TraitDefinition {
    /// Create a definition applying to every class and version, with unit costs.
    ///
    /// Fails if `min_value > max_value`.
    pub fn new(
        name: impl Into<String>,
        category_id: CategoryId,
        min_value: u32,
        max_value: u32,
    ) -> CoreResult<Self> {
        let def = Self {
            id: TraitId::new(),
            name: name.into(),
            category_id,
            game_versions: vec![GameVersion::V4, GameVersion::V5],
            character_classes: CharacterClass::ALL.to_vec(),
            min_value,
            max_value,
            initial_cost: 1,
            upgrade_cost: 1,
            is_custom: false,
            custom_for_character_id: None,
            advantage_category_id: None,
            is_archived: false,
        };
        def.validate()?;
        Ok(def)
    }

    /// Check `min_value <= max_value`.
    ///
    /// Deserialized definitions bypass [`TraitDefinition::new`], so loaders
    /// call this on every trait they read.
    pub fn validate(&self) -> CoreResult<()> {
        if self.min_value > self.max_value {
            return Err(CoreError::InvalidDefinition(format!(
                "trait '{}': min_value {} exceeds max_value {}",
                self.name, self.min_value, self.max_value
            )));
        }
        Ok(())
    }

    /// Set the initial and upgrade costs.
    pub fn with_costs(mut self, initial_cost: u32, upgrade_cost: u32) -> Self {
        self.initial_cost = initial_cost;
        self.upgrade_cost = upgrade_cost;
        self
    }

    /// Restrict the trait to the given classes.
    pub fn for_classes(mut self, classes: &[CharacterClass]) -> Self {
        self.character_classes = classes.to_vec();
        self
    }

    /// Restrict the trait to the given game versions.
    pub fn for_versions(mut self, versions: &[GameVersion]) -> Self {
        self.game_versions = versions.to_vec();
        self
    }

    /// Place the trait in an advantage category.
    pub fn in_advantage_category(mut self, id: AdvantageCategoryId) -> Self {
        self.advantage_category_id = Some(id);
        self
    }

    /// Returns true if `value` lies within `[min_value, max_value]`.
    pub fn allows(&self, value: u32) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }

    /// Clamp `value` into the trait's bounds.
    ///
    /// Never panics; an inverted definition clamps to `max_value`.
    pub fn clamp(&self, value: u32) -> u32 {
        value.max(self.min_value).min(self.max_value)
    }

    /// Returns true if the trait applies to this class.
    pub fn applies_to_class(&self, class: CharacterClass) -> bool {
        self.character_classes.contains(&class)
    }

    /// Returns true if the trait appears in this game version.
    pub fn applies_to_version(&self, version: GameVersion) -> bool {
        self.game_versions.contains(&version)
    }
}

/// A grouping of traits (Physical, Skills, Disciplines, Merits, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitCategory {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Sheet section the category belongs to.
    pub section: SheetSection,
    /// Classes the category applies to.
    pub character_classes: Vec<CharacterClass>,
    /// Game versions the category appears in.
    pub game_versions: Vec<GameVersion>,
    /// Default initial cost inherited by custom traits.
    pub initial_cost: u32,
    /// Default upgrade cost inherited by custom traits.
    pub upgrade_cost: u32,
    /// Archived categories are skipped by generation.
    #[serde(default)]
    pub is_archived: bool,
}

impl TraitCategory {
    /// Create a category applying to every class and version.
    pub fn new(name: impl Into<String>, section: SheetSection) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            section,
            character_classes: CharacterClass::ALL.to_vec(),
            game_versions: vec![GameVersion::V4, GameVersion::V5],
            initial_cost: 1,
            upgrade_cost: 1,
            is_archived: false,
        }
    }

    /// Set the default costs custom traits inherit.
    pub fn with_costs(mut self, initial_cost: u32, upgrade_cost: u32) -> Self {
        self.initial_cost = initial_cost;
        self.upgrade_cost = upgrade_cost;
        self
    }

    /// Restrict the category to the given classes.
    pub fn for_classes(mut self, classes: &[CharacterClass]) -> Self {
        self.character_classes = classes.to_vec();
        self
    }
}

/// Groups merits, backgrounds and flaws; some require a parent trait first.
///
/// When `requires_parent` is set, the parent is the trait whose name equals
/// the category name (e.g. the "Haven" background for haven merits).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvantageCategory {
    /// Unique identifier.
    pub id: AdvantageCategoryId,
    /// Name, also the name of the parent trait.
    pub name: String,
    /// Whether members need the parent trait.
    pub requires_parent: bool,
}

impl AdvantageCategory {
    /// Create an advantage category.
    pub fn new(name: impl Into<String>, requires_parent: bool) -> Self {
        Self {
            id: AdvantageCategoryId::new(),
            name: name.into(),
            requires_parent,
        }
    }
}

/// A character's rating in one trait.
///
/// At most one assignment exists per (character, trait). `version` is the
/// optimistic-concurrency token checked by every store update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterTrait {
    /// Unique identifier.
    pub id: AssignmentId,
    /// Owning character.
    pub character_id: CharacterId,
    /// Rated trait.
    pub trait_id: TraitId,
    /// Current rating.
    pub value: u32,
    /// Write version, bumped by the store on every update.
    #[serde(default)]
    pub version: u64,
}

impl CharacterTrait {
    /// Create a fresh, unsaved assignment.
    pub fn new(character_id: CharacterId, trait_id: TraitId, value: u32) -> Self {
        Self {
            id: AssignmentId::new(),
            character_id,
            trait_id,
            value,
            version: 0,
        }
    }
}
