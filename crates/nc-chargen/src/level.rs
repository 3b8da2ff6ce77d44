//! Experience levels and ability focus, the two generation knobs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How seasoned a generated character is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExperienceLevel {
    /// Fresh off character creation.
    #[default]
    New,
    /// A few stories in.
    Intermediate,
    /// A veteran.
    Advanced,
    /// Among the best there is.
    Elite,
}

impl ExperienceLevel {
    /// All levels, lowest first.
    pub const ALL: [ExperienceLevel; 4] = [Self::New, Self::Intermediate, Self::Advanced, Self::Elite];

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Elite => "elite",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown experience level: {s} (expected new, intermediate, advanced or elite)")
            })
    }
}

/// One value per experience level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerLevel<T> {
    /// Value at [`ExperienceLevel::New`].
    pub new: T,
    /// Value at [`ExperienceLevel::Intermediate`].
    pub intermediate: T,
    /// Value at [`ExperienceLevel::Advanced`].
    pub advanced: T,
    /// Value at [`ExperienceLevel::Elite`].
    pub elite: T,
}

impl<T: Copy> PerLevel<T> {
    /// Build a table from values listed lowest level first.
    pub const fn new(new: T, intermediate: T, advanced: T, elite: T) -> Self {
        Self {
            new,
            intermediate,
            advanced,
            elite,
        }
    }

    /// The value for `level`.
    pub fn get(&self, level: ExperienceLevel) -> T {
        match level {
            ExperienceLevel::New => self.new,
            ExperienceLevel::Intermediate => self.intermediate,
            ExperienceLevel::Advanced => self.advanced,
            ExperienceLevel::Elite => self.elite,
        }
    }
}

/// How ability dots are spread: thin and wide, even, or deep and narrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AbilityFocus {
    /// Many abilities at low ratings.
    JackOfAllTrades,
    /// A middle ground.
    Balanced,
    /// Few abilities at high ratings.
    Specialist,
}

impl AbilityFocus {
    /// All foci.
    pub const ALL: [AbilityFocus; 3] = [Self::JackOfAllTrades, Self::Balanced, Self::Specialist];

    /// Lowercase, dash-separated name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::JackOfAllTrades => "jack-of-all-trades",
            Self::Balanced => "balanced",
            Self::Specialist => "specialist",
        }
    }

    /// The dot array this focus distributes before level bonuses.
    pub fn distribution(self) -> &'static [u32] {
        match self {
            Self::JackOfAllTrades => &crate::tables::JACK_OF_ALL_TRADES_DOTS,
            Self::Balanced => &crate::tables::BALANCED_DOTS,
            Self::Specialist => &crate::tables::SPECIALIST_DOTS,
        }
    }
}

impl fmt::Display for AbilityFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbilityFocus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| {
                format!("unknown ability focus: {s} (expected jack-of-all-trades, balanced or specialist)")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("ELITE".parse::<ExperienceLevel>().unwrap(), ExperienceLevel::Elite);
        assert!("legendary".parse::<ExperienceLevel>().is_err());
    }

    #[test]
    fn focus_accepts_underscores() {
        assert_eq!(
            "jack_of_all_trades".parse::<AbilityFocus>().unwrap(),
            AbilityFocus::JackOfAllTrades
        );
        assert_eq!("Specialist".parse::<AbilityFocus>().unwrap(), AbilityFocus::Specialist);
    }

    #[test]
    fn per_level_lookup() {
        let table = PerLevel::new(1, 2, 3, 4);
        let got: Vec<_> = ExperienceLevel::ALL.iter().map(|l| table.get(*l)).collect();
        assert_eq!(got, vec![1, 2, 3, 4]);
    }
}
