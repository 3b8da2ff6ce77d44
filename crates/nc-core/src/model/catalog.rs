//! Catalog documents: clans, tribes, gifts, edges, concepts.
//!
//! A [`Catalog`] bundles every catalog document plus the trait definitions
//! and categories. It is plain data so it can be loaded from JSON and used
//! to seed a [`crate::store::MemoryStore`].

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::id::{AuspiceId, ClanId, ConceptId, EdgeId, GiftId, PerkId, RiteId, TraitId, TribeId};
use crate::model::kind::Renown;
use crate::model::trait_def::{AdvantageCategory, TraitCategory, TraitDefinition};

/// A vampire clan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VampireClan {
    /// Unique identifier.
    pub id: ClanId,
    /// Display name.
    pub name: String,
    /// Standard bane.
    pub bane: Option<String>,
    /// Alternative bane.
    pub variant_bane: Option<String>,
    /// Clan compulsion.
    pub compulsion: Option<String>,
    /// In-clan discipline traits.
    pub discipline_ids: Vec<TraitId>,
    /// Archived clans are never chosen at random.
    #[serde(default)]
    pub is_archived: bool,
}

impl VampireClan {
    /// Create a clan with no bane, compulsion or disciplines.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ClanId::new(),
            name: name.into(),
            bane: None,
            variant_bane: None,
            compulsion: None,
            discipline_ids: Vec::new(),
            is_archived: false,
        }
    }
}

/// A werewolf tribe and the renown it favors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WerewolfTribe {
    /// Unique identifier.
    pub id: TribeId,
    /// Display name.
    pub name: String,
    /// Favored renown.
    pub renown: Renown,
    /// Archived tribes are never chosen at random.
    #[serde(default)]
    pub is_archived: bool,
}

impl WerewolfTribe {
    /// Create a tribe.
    pub fn new(name: impl Into<String>, renown: Renown) -> Self {
        Self {
            id: TribeId::new(),
            name: name.into(),
            renown,
            is_archived: false,
        }
    }
}

/// A werewolf auspice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WerewolfAuspice {
    /// Unique identifier.
    pub id: AuspiceId,
    /// Display name.
    pub name: String,
    /// Archived auspices are never chosen at random.
    #[serde(default)]
    pub is_archived: bool,
}

impl WerewolfAuspice {
    /// Create an auspice.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: AuspiceId::new(),
            name: name.into(),
            is_archived: false,
        }
    }
}

/// A werewolf gift, owned by a tribe, an auspice, or native to all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WerewolfGift {
    /// Unique identifier.
    pub id: GiftId,
    /// Display name.
    pub name: String,
    /// Tribe that teaches the gift.
    pub tribe_id: Option<TribeId>,
    /// Auspice that teaches the gift.
    pub auspice_id: Option<AuspiceId>,
    /// Native gifts are open to every werewolf.
    pub is_native_gift: bool,
    /// Total renown required to learn it.
    pub minimum_renown: u32,
    /// Archived gifts are never chosen.
    #[serde(default)]
    pub is_archived: bool,
}

impl WerewolfGift {
    fn base(name: impl Into<String>, minimum_renown: u32) -> Self {
        Self {
            id: GiftId::new(),
            name: name.into(),
            tribe_id: None,
            auspice_id: None,
            is_native_gift: false,
            minimum_renown,
            is_archived: false,
        }
    }

    /// A tribe gift.
    pub fn tribal(name: impl Into<String>, tribe_id: TribeId, minimum_renown: u32) -> Self {
        Self {
            tribe_id: Some(tribe_id),
            ..Self::base(name, minimum_renown)
        }
    }

    /// An auspice gift.
    pub fn auspice(name: impl Into<String>, auspice_id: AuspiceId, minimum_renown: u32) -> Self {
        Self {
            auspice_id: Some(auspice_id),
            ..Self::base(name, minimum_renown)
        }
    }

    /// A native gift.
    pub fn native(name: impl Into<String>, minimum_renown: u32) -> Self {
        Self {
            is_native_gift: true,
            ..Self::base(name, minimum_renown)
        }
    }
}

/// A werewolf rite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WerewolfRite {
    /// Unique identifier.
    pub id: RiteId,
    /// Display name.
    pub name: String,
    /// Archived rites are never chosen.
    #[serde(default)]
    pub is_archived: bool,
}

impl WerewolfRite {
    /// Create a rite.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RiteId::new(),
            name: name.into(),
            is_archived: false,
        }
    }
}

/// A hunter edge and the perks it unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterEdge {
    /// Unique identifier.
    pub id: EdgeId,
    /// Display name.
    pub name: String,
    /// Perks available under this edge.
    pub perk_ids: Vec<PerkId>,
    /// Archived edges are never chosen.
    #[serde(default)]
    pub is_archived: bool,
}

impl HunterEdge {
    /// Create an edge with no perks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EdgeId::new(),
            name: name.into(),
            perk_ids: Vec::new(),
            is_archived: false,
        }
    }
}

/// A perk belonging to one hunter edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterEdgePerk {
    /// Unique identifier.
    pub id: PerkId,
    /// Display name.
    pub name: String,
    /// Owning edge.
    pub edge_id: EdgeId,
}

impl HunterEdgePerk {
    /// Create a perk under `edge_id`.
    pub fn new(name: impl Into<String>, edge_id: EdgeId) -> Self {
        Self {
            id: PerkId::new(),
            name: name.into(),
            edge_id,
        }
    }
}

/// A character concept and the abilities it favors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterConcept {
    /// Unique identifier.
    pub id: ConceptId,
    /// Display name.
    pub name: String,
    /// Abilities that receive the highest dots first.
    pub favored_ability_names: Vec<String>,
    /// Archived concepts are never chosen at random.
    #[serde(default)]
    pub is_archived: bool,
}

impl CharacterConcept {
    /// Create a concept.
    pub fn new(name: impl Into<String>, favored: &[&str]) -> Self {
        Self {
            id: ConceptId::new(),
            name: name.into(),
            favored_ability_names: favored.iter().map(|s| s.to_string()).collect(),
            is_archived: false,
        }
    }
}

/// Every catalog document, as plain data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Trait categories.
    pub categories: Vec<TraitCategory>,
    /// Advantage categories.
    pub advantage_categories: Vec<AdvantageCategory>,
    /// Trait definitions.
    pub traits: Vec<TraitDefinition>,
    /// Vampire clans.
    pub clans: Vec<VampireClan>,
    /// Werewolf tribes.
    pub tribes: Vec<WerewolfTribe>,
    /// Werewolf auspices.
    pub auspices: Vec<WerewolfAuspice>,
    /// Werewolf gifts.
    pub gifts: Vec<WerewolfGift>,
    /// Werewolf rites.
    pub rites: Vec<WerewolfRite>,
    /// Hunter edges.
    pub edges: Vec<HunterEdge>,
    /// Hunter edge perks.
    pub perks: Vec<HunterEdgePerk>,
    /// Character concepts.
    pub concepts: Vec<CharacterConcept>,
}

impl Catalog {
    /// Parse a catalog from JSON.
    ///
    /// Every trait definition is validated; an inverted `min_value..max_value`
    /// range is a [`CoreError::InvalidDefinition`](crate::CoreError::InvalidDefinition).
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        for def in &catalog.traits {
            def.validate()?;
        }
        Ok(catalog)
    }

    /// Serialize the catalog to pretty JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a trait by name (case-insensitive).
    pub fn trait_named(&self, name: &str) -> Option<&TraitDefinition> {
        self.traits
            .iter()
            .find(|t| crate::names::same_name(&t.name, name))
    }

    /// Find a category by name (case-insensitive).
    pub fn category_named(&self, name: &str) -> Option<&TraitCategory> {
        self.categories
            .iter()
            .find(|c| crate::names::same_name(&c.name, name))
    }
}
