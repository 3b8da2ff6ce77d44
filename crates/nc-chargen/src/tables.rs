//! Generation constants, indexed by experience level where they vary.

use crate::level::PerLevel;

/// Attribute dots before level bonuses, one per attribute.
pub const ATTRIBUTE_DOTS: [u32; 9] = [1, 2, 2, 2, 2, 3, 3, 3, 4];

/// Ability dots for [`AbilityFocus::JackOfAllTrades`](crate::AbilityFocus::JackOfAllTrades).
pub const JACK_OF_ALL_TRADES_DOTS: [u32; 19] = [3, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// Ability dots for [`AbilityFocus::Balanced`](crate::AbilityFocus::Balanced).
pub const BALANCED_DOTS: [u32; 15] = [3, 3, 3, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1];
/// Ability dots for [`AbilityFocus::Specialist`](crate::AbilityFocus::Specialist).
pub const SPECIALIST_DOTS: [u32; 10] = [4, 3, 3, 3, 2, 2, 2, 1, 1, 1];

/// Extra attribute dots.
pub const ATTRIBUTE_DOT_BONUS: PerLevel<u32> = PerLevel::new(0, 5, 10, 15);
/// Extra ability dots.
pub const ABILITY_DOT_BONUS: PerLevel<u32> = PerLevel::new(0, 5, 10, 15);
/// Dots spent on backgrounds and merits.
pub const ADVANTAGE_STARTING_DOTS: PerLevel<u32> = PerLevel::new(7, 10, 13, 16);
/// Dots spent on flaws.
pub const FLAW_STARTING_DOTS: PerLevel<u32> = PerLevel::new(2, 2, 4, 5);

/// Disciplines beyond the clan's own.
pub const EXTRA_DISCIPLINES: PerLevel<usize> = PerLevel::new(0, 1, 2, 3);
/// Mean of the discipline rating distribution.
pub const DISCIPLINE_MEAN: PerLevel<f64> = PerLevel::new(1.0, 1.5, 2.5, 3.0);
/// Default spread of the discipline rating distribution.
pub const DISCIPLINE_STDEV: f64 = 2.0;

/// Gifts beyond the one tribe, one auspice and one native gift.
pub const EXTRA_WEREWOLF_GIFTS: PerLevel<u32> = PerLevel::new(0, 2, 4, 7);
/// Rites known.
pub const WEREWOLF_RITES: PerLevel<usize> = PerLevel::new(1, 2, 3, 4);
/// Added to every renown rating.
pub const RENOWN_MODIFIER: PerLevel<u32> = PerLevel::new(0, 1, 2, 3);
/// Most extra gifts a single gift pool receives.
pub const MAX_GIFTS_PER_POOL: u32 = 5;

/// Edges beyond the baseline.
pub const EXTRA_HUNTER_EDGES: PerLevel<usize> = PerLevel::new(0, 0, 1, 3);
/// Perks beyond the baseline.
pub const EXTRA_HUNTER_PERKS: PerLevel<usize> = PerLevel::new(0, 2, 3, 5);

/// Starting Humanity for classes that track it.
pub const STARTING_HUMANITY: u32 = 7;
/// Range of the V4 Willpower roll.
pub const V4_WILLPOWER: (u32, u32) = (3, 7);
/// Range of the Rage roll.
pub const RAGE_RANGE: (u32, u32) = (1, 3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ability_arrays_descend() {
        for dots in [&JACK_OF_ALL_TRADES_DOTS[..], &BALANCED_DOTS, &SPECIALIST_DOTS] {
            assert!(dots.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn attribute_dots_total() {
        assert_eq!(ATTRIBUTE_DOTS.iter().sum::<u32>(), 22);
    }
}
