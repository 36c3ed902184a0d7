//! Property-based tests for dataset partitioning
//!
//! Any valid split must be disjoint and exhaustive; exact counts must be
//! honored and ratio sizes must round up.

use docprep::operations::{partition_files, DatasetSplit, SplitSpec};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;

fn files(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("page_{i}.png")).collect()
}

fn union(split: &DatasetSplit) -> (usize, BTreeSet<String>) {
    let all: Vec<&String> = split
        .train
        .iter()
        .chain(split.test.iter())
        .chain(split.eval.iter())
        .collect();
    let unique = all.iter().map(|s| s.to_string()).collect();
    (all.len(), unique)
}

prop_compose! {
    fn counts_case()(total in 1usize..80)(
        total in Just(total),
        test in 0..=total,
        eval in 0..=total,
        seed in any::<u64>(),
    ) -> (usize, usize, usize, u64) {
        let eval = eval.min(total - test);
        let test = if test + eval == 0 { 1 } else { test };
        (total, test, eval, seed)
    }
}

proptest! {
    #[test]
    fn test_counts_split_sizes((total, test, eval, seed) in counts_case()) {
        let input = files(total);
        let mut rng = StdRng::seed_from_u64(seed);

        let split = partition_files(input.clone(), &SplitSpec::Counts { test, eval }, &mut rng)
            .unwrap();

        prop_assert_eq!(split.train.len(), total - test - eval);
        prop_assert_eq!(split.test.len(), test);
        prop_assert_eq!(split.eval.len(), eval);

        let (count, unique) = union(&split);
        prop_assert_eq!(count, total);
        prop_assert_eq!(unique, input.into_iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn test_ratio_split_is_partition(
        total in 0usize..120,
        test in 0.01f64..0.5,
        eval in 0.0f64..0.45,
        seed in any::<u64>(),
    ) {
        let input = files(total);
        let mut rng = StdRng::seed_from_u64(seed);

        let split = partition_files(input.clone(), &SplitSpec::Ratios { test, eval }, &mut rng)
            .unwrap();

        let held_out = split.test.len() + split.eval.len();
        prop_assert!(held_out as f64 >= (test + eval) * total as f64 - 1e-6);
        prop_assert!((held_out as f64) < (test + eval) * total as f64 + 1.0);

        let (count, unique) = union(&split);
        prop_assert_eq!(count, total);
        prop_assert_eq!(unique, input.into_iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn test_zero_eval_ratio_leaves_eval_empty(
        total in 0usize..120,
        test in 0.01f64..0.99,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let split = partition_files(files(total), &SplitSpec::Ratios { test, eval: 0.0 }, &mut rng)
            .unwrap();

        prop_assert!(split.eval.is_empty());
        let expected = test * total as f64;
        prop_assert!((split.test.len() as f64 - expected).abs() < 1.0 + 1e-6);
    }
}
