//! Percentile table mapping a d100 roll to a character class.

use nc_core::CharacterClass;
use rand::Rng;
use rand::rngs::StdRng;

/// Share of the d100 range that rolls a mortal.
pub const MORTAL_PERCENTILE: u32 = 59;

/// A closed range of rolls that selects one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Class selected by this range.
    pub class: CharacterClass,
    /// Lowest roll, inclusive.
    pub low: u32,
    /// Highest roll, inclusive.
    pub high: u32,
}

impl Bucket {
    /// Whether `roll` lands in this bucket.
    pub fn contains(&self, roll: u32) -> bool {
        (self.low..=self.high).contains(&roll)
    }
}

/// Buckets covering 0..=100, Mortal first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentileTable {
    buckets: Vec<Bucket>,
}

impl PercentileTable {
    /// All buckets in lookup order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// The bucket for `class`, if it has one.
    pub fn bucket(&self, class: CharacterClass) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.class == class)
    }
}

impl Default for PercentileTable {
    fn default() -> Self {
        build_percentile_table(MORTAL_PERCENTILE)
    }
}

/// Build the table: Mortal gets `[0, mortal_pct]`, the remaining space is
/// split evenly across the other classes in declaration order, and the last
/// bucket is stretched to 100 to absorb the rounding loss.
pub fn build_percentile_table(mortal_pct: u32) -> PercentileTable {
    let mortal_pct = mortal_pct.min(100);
    let others: Vec<CharacterClass> = CharacterClass::ALL
        .into_iter()
        .filter(|c| *c != CharacterClass::Mortal)
        .collect();
    let step = (100 - mortal_pct) / others.len() as u32;

    let mut buckets = vec![Bucket {
        class: CharacterClass::Mortal,
        low: 0,
        high: mortal_pct,
    }];
    let mut start = mortal_pct + 1;
    for class in others {
        let high = (start + step).min(100);
        buckets.push(Bucket {
            class,
            low: start,
            high,
        });
        start = high + 1;
    }
    if let Some(last) = buckets.last_mut() {
        last.high = 100;
    }
    PercentileTable { buckets }
}

/// The class whose bucket holds `roll`; Mortal when nothing matches.
pub fn class_from_percentile(table: &PercentileTable, roll: u32) -> CharacterClass {
    table
        .buckets
        .iter()
        .find(|b| b.contains(roll))
        .map_or(CharacterClass::Mortal, |b| b.class)
}

/// Roll 1..=100 and look the class up.
pub fn roll_class(rng: &mut StdRng, table: &PercentileTable) -> CharacterClass {
    class_from_percentile(table, rng.random_range(1..=100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn mortal_bucket_is_exact() {
        let table = build_percentile_table(MORTAL_PERCENTILE);
        let mortal = table.bucket(CharacterClass::Mortal).unwrap();
        assert_eq!((mortal.low, mortal.high), (0, 59));
    }

    #[test]
    fn buckets_are_contiguous_up_to_100() {
        let table = PercentileTable::default();
        let buckets = table.buckets();
        assert_eq!(buckets.len(), CharacterClass::ALL.len());
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].high + 1, pair[1].low);
        }
        assert_eq!(buckets.last().unwrap().high, 100);
    }

    #[test]
    fn every_roll_maps_to_its_bucket() {
        let table = PercentileTable::default();
        for roll in 1..=100 {
            let class = class_from_percentile(&table, roll);
            assert!(table.bucket(class).unwrap().contains(roll), "roll {roll}");
        }
        assert_eq!(class_from_percentile(&table, 30), CharacterClass::Mortal);
        assert_eq!(class_from_percentile(&table, 60), CharacterClass::Vampire);
        assert_eq!(class_from_percentile(&table, 100), CharacterClass::Ghoul);
    }

    #[test]
    fn out_of_range_defaults_to_mortal() {
        let table = PercentileTable::default();
        assert_eq!(class_from_percentile(&table, 250), CharacterClass::Mortal);
    }

    #[test]
    fn roll_class_is_seeded() {
        let table = PercentileTable::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let left: Vec<_> = (0..20).map(|_| roll_class(&mut a, &table)).collect();
        let right: Vec<_> = (0..20).map(|_| roll_class(&mut b, &table)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn all_mortal_table() {
        let table = build_percentile_table(100);
        for roll in 1..=100 {
            assert_eq!(class_from_percentile(&table, roll), CharacterClass::Mortal);
        }
    }
}
