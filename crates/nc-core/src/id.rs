use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", &self.0.to_string()[..8])
            }
        }
    };
}

define_id!(
    /// Identifies a trait definition in the catalog.
    TraitId
);
define_id!(
    /// Identifies a trait category (Physical, Disciplines, Merits, ...).
    CategoryId
);
define_id!(
    /// Identifies an advantage category grouping merits, backgrounds and flaws.
    AdvantageCategoryId
);
define_id!(
    /// Identifies a single character-trait assignment.
    AssignmentId
);
define_id!(
    /// Identifies a character.
    CharacterId
);
define_id!(
    /// Identifies a user (player or storyteller).
    UserId
);
define_id!(
    /// Identifies a campaign.
    CampaignId
);
define_id!(
    /// Identifies a character concept.
    ConceptId
);
define_id!(
    /// Identifies a vampire clan.
    ClanId
);
define_id!(
    /// Identifies a werewolf tribe.
    TribeId
);
define_id!(
    /// Identifies a werewolf auspice.
    AuspiceId
);
define_id!(
    /// Identifies a werewolf gift.
    GiftId
);
define_id!(
    /// Identifies a werewolf rite.
    RiteId
);
define_id!(
    /// Identifies a hunter edge.
    EdgeId
);
define_id!(
    /// Identifies a perk belonging to a hunter edge.
    PerkId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(TraitId::new(), TraitId::new());
    }

    #[test]
    fn display_is_short() {
        let id = CharacterId::new();
        assert_eq!(id.to_string().len(), 8);
        assert!(id.0.to_string().starts_with(&id.to_string()));
    }

    #[test]
    fn serializes_as_plain_uuid() {
        let id = ClanId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0));
        let back: ClanId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
