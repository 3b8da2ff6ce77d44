//! Enumerations shared by characters, traits and the catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The supernatural (or not) class of a character.
///
/// Declaration order matters: the percentile class table walks the
/// non-mortal classes in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CharacterClass {
    /// Kindred.
    Vampire,
    /// Garou.
    Werewolf,
    /// Awakened.
    Mage,
    /// Mortal monster hunter.
    Hunter,
    /// Mortal bound by vampire blood.
    Ghoul,
    /// Plain mortal.
    Mortal,
}

impl CharacterClass {
    /// Every class, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Vampire,
        Self::Werewolf,
        Self::Mage,
        Self::Hunter,
        Self::Ghoul,
        Self::Mortal,
    ];

    /// Lowercase name used in output and parsing.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vampire => "vampire",
            Self::Werewolf => "werewolf",
            Self::Mage => "mage",
            Self::Hunter => "hunter",
            Self::Ghoul => "ghoul",
            Self::Mortal => "mortal",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| format!("unknown character class: {s}"))
    }
}

/// Rules edition a character or trait belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameVersion {
    /// Fourth edition / classic rules.
    V4,
    /// Fifth edition rules.
    V5,
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "V4"),
            Self::V5 => write!(f, "V5"),
        }
    }
}

impl FromStr for GameVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v4" | "4" => Ok(Self::V4),
            "v5" | "5" => Ok(Self::V5),
            _ => Err(format!("unknown game version: {s}")),
        }
    }
}

/// Who a character belongs to at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CharacterType {
    /// A player character.
    #[default]
    Player,
    /// A non-player character.
    Npc,
    /// A storyteller-owned character.
    Storyteller,
    /// A throwaway character used during development.
    Developer,
}

impl fmt::Display for CharacterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Npc => write!(f, "npc"),
            Self::Storyteller => write!(f, "storyteller"),
            Self::Developer => write!(f, "developer"),
        }
    }
}

impl FromStr for CharacterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "player" => Ok(Self::Player),
            "npc" => Ok(Self::Npc),
            "storyteller" => Ok(Self::Storyteller),
            "developer" => Ok(Self::Developer),
            _ => Err(format!("unknown character type: {s}")),
        }
    }
}

/// Hunter creed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HunterCreed {
    /// Builders and tinkerers.
    Entrepreneurial,
    /// Hunters of faith.
    Faithful,
    /// Investigators.
    Inquisitive,
    /// Fighters.
    Martial,
    /// Smugglers and street operators.
    Underground,
}

impl HunterCreed {
    /// Every creed.
    pub const ALL: [Self; 5] = [
        Self::Entrepreneurial,
        Self::Faithful,
        Self::Inquisitive,
        Self::Martial,
        Self::Underground,
    ];
}

impl fmt::Display for HunterCreed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entrepreneurial => write!(f, "Entrepreneurial"),
            Self::Faithful => write!(f, "Faithful"),
            Self::Inquisitive => write!(f, "Inquisitive"),
            Self::Martial => write!(f, "Martial"),
            Self::Underground => write!(f, "Underground"),
        }
    }
}

/// One of the three werewolf renown traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Renown {
    /// Honor renown.
    Honor,
    /// Wisdom renown.
    Wisdom,
    /// Glory renown.
    Glory,
}

impl Renown {
    /// All renown types.
    pub const ALL: [Self; 3] = [Self::Honor, Self::Wisdom, Self::Glory];

    /// The catalog trait name for this renown.
    pub fn trait_name(self) -> &'static str {
        match self {
            Self::Honor => crate::names::HONOR,
            Self::Wisdom => crate::names::WISDOM,
            Self::Glory => crate::names::GLORY,
        }
    }
}

impl fmt::Display for Renown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.trait_name())
    }
}
