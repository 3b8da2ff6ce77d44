//! Characters and their class-specific attribute bundles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{AuspiceId, CampaignId, CharacterId, ClanId, ConceptId, EdgeId, GiftId, PerkId};
use crate::id::{RiteId, TribeId, UserId};
use crate::model::kind::{CharacterClass, CharacterType, GameVersion, HunterCreed};

/// Vampire clan choice and its flavor text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VampireAttributes {
    /// Chosen clan.
    pub clan_id: Option<ClanId>,
    /// Clan display name.
    pub clan_name: Option<String>,
    /// Clan bane (base or variant).
    pub bane: Option<String>,
    /// Clan compulsion.
    pub compulsion: Option<String>,
}

/// Werewolf tribe, auspice, gifts and rites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WerewolfAttributes {
    /// Chosen tribe.
    pub tribe_id: Option<TribeId>,
    /// Tribe display name.
    pub tribe_name: Option<String>,
    /// Chosen auspice.
    pub auspice_id: Option<AuspiceId>,
    /// Auspice display name.
    pub auspice_name: Option<String>,
    /// Learned gifts.
    pub gift_ids: Vec<GiftId>,
    /// Known rites.
    pub rite_ids: Vec<RiteId>,
    /// Honor + Wisdom + Glory, kept current by the economy's recompute hook.
    pub total_renown: u32,
}

/// One hunter edge and the perks taken under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterEdgeAssignment {
    /// The edge.
    pub edge_id: EdgeId,
    /// Perks taken from this edge.
    pub perk_ids: Vec<PerkId>,
}

impl HunterEdgeAssignment {
    /// An edge with no perks yet.
    pub fn new(edge_id: EdgeId) -> Self {
        Self {
            edge_id,
            perk_ids: Vec::new(),
        }
    }
}

/// Hunter creed and edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunterAttributes {
    /// Chosen creed.
    pub creed: Option<HunterCreed>,
    /// Edges with their perks.
    pub edges: Vec<HunterEdgeAssignment>,
}

impl HunterAttributes {
    /// Total number of perks across all edges.
    pub fn perk_count(&self) -> usize {
        self.edges.iter().map(|e| e.perk_ids.len()).sum()
    }

    /// The edge entry for `edge_id`, if taken.
    pub fn edge(&self, edge_id: EdgeId) -> Option<&HunterEdgeAssignment> {
        self.edges.iter().find(|e| e.edge_id == edge_id)
    }
}

/// Mage sphere and tradition. Not generated, only carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MageAttributes {
    /// Primary sphere.
    pub sphere: Option<String>,
    /// Tradition.
    pub tradition: Option<String>,
}

/// A character and its class-specific bundles.
///
/// Every bundle exists from creation on and starts empty; only the one
/// matching `character_class` is ever populated by generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique identifier.
    pub id: CharacterId,
    /// Given name.
    pub name_first: String,
    /// Family name.
    pub name_last: String,
    /// Supernatural class.
    pub character_class: CharacterClass,
    /// Table role.
    pub character_type: CharacterType,
    /// Rules edition.
    pub game_version: GameVersion,
    /// Optional concept.
    pub concept_id: Option<ConceptId>,
    /// Campaign whose XP wallet pays for purchases.
    pub campaign_id: Option<CampaignId>,
    /// Player who owns the character.
    pub user_player_id: UserId,
    /// User who created the character.
    pub user_creator_id: UserId,
    /// True while the character is still in character creation.
    pub is_chargen: bool,
    /// Pool spent during creation instead of XP.
    pub starting_points: u32,
    /// Creation timestamp.
    pub date_created: DateTime<Utc>,
    /// Vampire bundle.
    pub vampire_attributes: VampireAttributes,
    /// Werewolf bundle.
    pub werewolf_attributes: WerewolfAttributes,
    /// Hunter bundle.
    pub hunter_attributes: HunterAttributes,
    /// Mage bundle.
    pub mage_attributes: MageAttributes,
    /// Write version, bumped by the store on every update.
    #[serde(default)]
    pub version: u64,
}

impl Character {
    /// Create a character owned and created by `user_id`, with empty bundles.
    pub fn new(
        name_first: impl Into<String>,
        name_last: impl Into<String>,
        character_class: CharacterClass,
        game_version: GameVersion,
        user_id: UserId,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            name_first: name_first.into(),
            name_last: name_last.into(),
            character_class,
            character_type: CharacterType::default(),
            game_version,
            concept_id: None,
            campaign_id: None,
            user_player_id: user_id,
            user_creator_id: user_id,
            is_chargen: false,
            starting_points: 0,
            date_created: Utc::now(),
            vampire_attributes: VampireAttributes::default(),
            werewolf_attributes: WerewolfAttributes::default(),
            hunter_attributes: HunterAttributes::default(),
            mage_attributes: MageAttributes::default(),
            version: 0,
        }
    }

    /// Set the campaign.
    pub fn in_campaign(mut self, campaign_id: CampaignId) -> Self {
        self.campaign_id = Some(campaign_id);
        self
    }

    /// Set the starting-point pool.
    pub fn with_starting_points(mut self, points: u32) -> Self {
        self.starting_points = points;
        self
    }

    /// Set the table role.
    pub fn with_type(mut self, character_type: CharacterType) -> Self {
        self.character_type = character_type;
        self
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name_first, self.name_last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_character_has_empty_bundles() {
        let c = Character::new("Ada", "Lovelace", CharacterClass::Mortal, GameVersion::V5, UserId::new());
        assert_eq!(c.vampire_attributes, VampireAttributes::default());
        assert_eq!(c.werewolf_attributes.total_renown, 0);
        assert!(c.hunter_attributes.edges.is_empty());
        assert_eq!(c.full_name(), "Ada Lovelace");
        assert_eq!(c.user_player_id, c.user_creator_id);
    }

    #[test]
    fn hunter_perk_count() {
        let mut attrs = HunterAttributes::default();
        let mut edge = HunterEdgeAssignment::new(EdgeId::new());
        edge.perk_ids.push(PerkId::new());
        edge.perk_ids.push(PerkId::new());
        attrs.edges.push(edge.clone());
        attrs.edges.push(HunterEdgeAssignment::new(EdgeId::new()));
        assert_eq!(attrs.perk_count(), 2);
        assert!(attrs.edge(edge.edge_id).is_some());
    }
}
