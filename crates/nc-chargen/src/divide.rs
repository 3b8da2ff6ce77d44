//! Split a total into random parts within bounds.

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{ChargenError, ChargenResult};

/// Divide `total` into `num` random parts, each in `[min_value, max_value]`.
///
/// Without `max_value` a part may take up to `total`. Every part is seeded
/// uniformly, then parts are nudged up or down until the sum is exact.
pub fn divide(
    rng: &mut StdRng,
    total: u32,
    num: usize,
    max_value: Option<u32>,
    min_value: u32,
) -> ChargenResult<Vec<u32>> {
    let (total_w, num_w, min_w) = (u64::from(total), num as u64, u64::from(min_value));

    if num == 0 {
        if total > 0 {
            return Err(ChargenError::validation(
                "num",
                format!("cannot divide {total} into zero parts"),
            ));
        }
        return Ok(Vec::new());
    }
    if total_w < num_w * min_w {
        return Err(ChargenError::validation(
            "total",
            format!("{total} is below {num} parts of at least {min_value}"),
        ));
    }
    if let Some(max) = max_value {
        if max < min_value {
            return Err(ChargenError::validation(
                "max_value",
                format!("max {max} is below min {min_value}"),
            ));
        }
        if num_w * u64::from(max) < total_w {
            return Err(ChargenError::validation(
                "max_value",
                format!("{num} parts of at most {max} cannot reach {total}"),
            ));
        }
    }

    let cap = max_value.unwrap_or(total).max(min_value);
    let mut parts: Vec<u32> = (0..num)
        .map(|_| rng.random_range(min_value..=cap))
        .collect();
    let mut current: u64 = parts.iter().map(|p| u64::from(*p)).sum();

    while current != total_w {
        for part in parts.iter_mut() {
            if current < total_w && *part < cap {
                let step = (total_w - current).min(u64::from(cap - *part));
                *part += step as u32;
                current += step;
            } else if current > total_w && *part > min_value {
                let step = (current - total_w).min(u64::from(*part - min_value));
                *part -= step as u32;
                current -= step;
            }
            if current == total_w {
                break;
            }
        }
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn field(err: ChargenError) -> &'static str {
        match err {
            ChargenError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn infeasible_max_is_rejected() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = divide(&mut rng, 10, 2, Some(3), 0).unwrap_err();
        assert_eq!(field(err), "max_value");
    }

    #[test]
    fn infeasible_min_is_rejected() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(field(divide(&mut rng, 3, 2, None, 2).unwrap_err()), "total");
        assert_eq!(field(divide(&mut rng, 5, 2, Some(1), 2).unwrap_err()), "max_value");
        assert_eq!(field(divide(&mut rng, 1, 0, None, 0).unwrap_err()), "num");
    }

    #[test]
    fn zero_total() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(divide(&mut rng, 0, 3, Some(5), 0).unwrap(), vec![0, 0, 0]);
        assert!(divide(&mut rng, 0, 0, None, 0).unwrap().is_empty());
    }

    #[test]
    fn exact_fit() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(divide(&mut rng, 15, 3, Some(5), 0).unwrap(), vec![5, 5, 5]);
    }

    proptest! {
        #[test]
        fn parts_sum_to_total_within_bounds(
            seed in any::<u64>(),
            num in 1usize..8,
            min in 0u32..4,
            span in 0u32..6,
            fill in 0.0f64..=1.0,
        ) {
            let max = min + span;
            let lo = num as u32 * min;
            let hi = num as u32 * max;
            let total = lo + ((hi - lo) as f64 * fill).round() as u32;

            let mut rng = StdRng::seed_from_u64(seed);
            let parts = divide(&mut rng, total, num, Some(max), min).unwrap();
            prop_assert_eq!(parts.len(), num);
            prop_assert_eq!(parts.iter().sum::<u32>(), total);
            prop_assert!(parts.iter().all(|p| *p >= min && *p <= max));
        }

        #[test]
        fn unbounded_parts_sum_to_total(seed in any::<u64>(), num in 1usize..6, total in 0u32..50) {
            let mut rng = StdRng::seed_from_u64(seed);
            let parts = divide(&mut rng, total, num, None, 0).unwrap();
            prop_assert_eq!(parts.iter().sum::<u32>(), total);
        }
    }
}
