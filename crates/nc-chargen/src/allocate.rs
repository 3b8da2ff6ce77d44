//! Spread level bonus dots over a base distribution.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::level::{ExperienceLevel, PerLevel};

/// Result of [`allocate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// Dot values in random order.
    pub values: Vec<u32>,
    /// Bonus dots left over because every slot hit the cap.
    pub unspent: u32,
}

impl Allocation {
    /// Whether every bonus dot was placed.
    pub fn is_complete(&self) -> bool {
        self.unspent == 0
    }

    /// Sum of all values.
    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }
}

/// Add `bonus[level]` dots one at a time to random slots below `max_value`,
/// then shuffle.
///
/// Stops early once every slot sits at `max_value`; the leftover is reported
/// in [`Allocation::unspent`].
pub fn allocate(
    rng: &mut StdRng,
    base: &[u32],
    level: ExperienceLevel,
    bonus: &PerLevel<u32>,
    max_value: u32,
) -> Allocation {
    let mut values = base.to_vec();
    let mut extra = bonus.get(level);

    while extra > 0 {
        let open: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v < max_value)
            .map(|(i, _)| i)
            .collect();
        if open.is_empty() {
            break;
        }
        let slot = open[rng.random_range(0..open.len())];
        values[slot] += 1;
        extra -= 1;
    }

    values.shuffle(rng);
    Allocation {
        values,
        unspent: extra,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{ATTRIBUTE_DOT_BONUS, ATTRIBUTE_DOTS};
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn new_level_only_shuffles() {
        let mut rng = StdRng::seed_from_u64(42);
        let out = allocate(&mut rng, &ATTRIBUTE_DOTS, ExperienceLevel::New, &ATTRIBUTE_DOT_BONUS, 5);
        let mut sorted = out.values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, ATTRIBUTE_DOTS.to_vec());
        assert!(out.is_complete());
    }

    #[test]
    fn bonus_is_spent_at_every_level() {
        let mut rng = StdRng::seed_from_u64(42);
        for level in ExperienceLevel::ALL {
            let out = allocate(&mut rng, &ATTRIBUTE_DOTS, level, &ATTRIBUTE_DOT_BONUS, 5);
            assert_eq!(out.total(), 22 + ATTRIBUTE_DOT_BONUS.get(level), "{level}");
            assert!(out.values.iter().all(|v| (1..=5).contains(v)));
        }
    }

    #[test]
    fn saturation_stops_early() {
        let mut rng = StdRng::seed_from_u64(7);
        let bonus = PerLevel::new(0, 0, 0, 10);
        let out = allocate(&mut rng, &[4, 5], ExperienceLevel::Elite, &bonus, 5);
        assert_eq!(out.values, vec![5, 5]);
        assert_eq!(out.unspent, 9);
        assert!(!out.is_complete());
    }

    #[test]
    fn empty_base_keeps_bonus_unspent() {
        let mut rng = StdRng::seed_from_u64(1);
        let bonus = PerLevel::new(3, 3, 3, 3);
        let out = allocate(&mut rng, &[], ExperienceLevel::New, &bonus, 5);
        assert!(out.values.is_empty());
        assert_eq!(out.unspent, 3);
    }

    proptest! {
        #[test]
        fn sum_matches_unless_saturated(
            seed in any::<u64>(),
            base in prop::collection::vec(0u32..=5, 1..12),
            extra in 0u32..40,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let bonus = PerLevel::new(extra, extra, extra, extra);
            let out = allocate(&mut rng, &base, ExperienceLevel::Advanced, &bonus, 5);
            let base_sum: u32 = base.iter().sum();
            let min = *base.iter().min().unwrap();

            prop_assert_eq!(out.values.len(), base.len());
            prop_assert!(out.values.iter().all(|v| *v >= min && *v <= 5));
            prop_assert_eq!(out.total() + out.unspent, base_sum + extra);
            if out.unspent > 0 {
                prop_assert!(out.values.iter().all(|v| *v == 5));
            }
        }
    }
}
