//! Configuration for a generator.

use nc_core::GameVersion;

use crate::percentile::MORTAL_PERCENTILE;
use crate::tables::{DISCIPLINE_STDEV, STARTING_HUMANITY, V4_WILLPOWER};

/// Settings shared by every character a generator produces.
#[derive(Debug, Clone)]
pub struct ChargenConfig {
    /// RNG seed for reproducible characters.
    pub seed: u64,
    /// Upper bound of the Mortal percentile bucket.
    pub mortal_percentile: u32,
    /// Rules edition generated characters use.
    pub game_version: GameVersion,
    /// Humanity for classes that track it.
    pub starting_humanity: u32,
    /// Inclusive range of the V4 Willpower roll.
    pub v4_willpower: (u32, u32),
    /// Names tried before giving up on a unique one.
    pub name_attempts: u32,
    /// Spread of discipline ratings.
    pub discipline_stdev: f64,
}

impl Default for ChargenConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            mortal_percentile: MORTAL_PERCENTILE,
            game_version: GameVersion::V5,
            starting_humanity: STARTING_HUMANITY,
            v4_willpower: V4_WILLPOWER,
            name_attempts: 100,
            discipline_stdev: DISCIPLINE_STDEV,
        }
    }
}

impl ChargenConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the Mortal percentile (clamped to 0-100).
    pub fn with_mortal_percentile(mut self, pct: u32) -> Self {
        self.mortal_percentile = pct.min(100);
        self
    }

    /// Set the game version.
    pub fn with_game_version(mut self, version: GameVersion) -> Self {
        self.game_version = version;
        self
    }

    /// Set starting Humanity.
    pub fn with_starting_humanity(mut self, humanity: u32) -> Self {
        self.starting_humanity = humanity;
        self
    }

    /// Set the V4 Willpower range; the bounds are swapped if given backwards.
    pub fn with_v4_willpower(mut self, low: u32, high: u32) -> Self {
        self.v4_willpower = (low.min(high), low.max(high));
        self
    }

    /// Set how many names to try.
    pub fn with_name_attempts(mut self, attempts: u32) -> Self {
        self.name_attempts = attempts;
        self
    }

    /// Set the discipline rating spread.
    pub fn with_discipline_stdev(mut self, stdev: f64) -> Self {
        self.discipline_stdev = stdev;
        self
    }
}
