// framepair-core/src/rng_test.rs

use super::*;
use approx::assert_relative_eq;
use std::collections::HashSet;

fn draw_sequence(rng: &mut SamplerRng, n: usize) -> Vec<usize> {
    (0..n).map(|_| rng.index(1000).unwrap()).collect()
}

#[test]
fn test_same_seed_same_sequence() {
    let mut a = SamplerRng::new(7);
    let mut b = SamplerRng::new(7);
    assert_eq!(draw_sequence(&mut a, 100), draw_sequence(&mut b, 100));

    let mut items_a: Vec<u32> = (0..50).collect();
    let mut items_b = items_a.clone();
    a.shuffle(&mut items_a);
    b.shuffle(&mut items_b);
    assert_eq!(items_a, items_b);
    assert_eq!(a.bernoulli(0.5), b.bernoulli(0.5));
}

#[test]
fn test_different_seeds_diverge() {
    let mut a = SamplerRng::new(1);
    let mut b = SamplerRng::new(2);
    assert_ne!(draw_sequence(&mut a, 100), draw_sequence(&mut b, 100));
}

#[test]
fn test_seed_is_reported() {
    assert_eq!(SamplerRng::new(42).seed(), 42);
}

#[test]
fn test_index_bounds() {
    let mut rng = SamplerRng::new(3);
    for _ in 0..1000 {
        assert!(rng.index(5).unwrap() < 5);
    }
    assert!(matches!(rng.index(0), Err(FramePairError::InvalidArgument(_))));
}

#[test]
fn test_range_inclusive() {
    let mut rng = SamplerRng::new(3);
    for _ in 0..1000 {
        let v = rng.range_inclusive(2, 4).unwrap();
        assert!((2..=4).contains(&v));
    }
    assert_eq!(rng.range_inclusive(6, 6).unwrap(), 6);
    assert!(rng.range_inclusive(5, 4).is_err());
}

#[test]
fn test_choose() {
    let mut rng = SamplerRng::new(11);
    let empty: Vec<u8> = vec![];
    assert!(rng.choose(&empty).is_none());
    let items = [10, 20, 30];
    let picked = *rng.choose(&items).unwrap();
    assert!(items.contains(&picked));
}

#[test]
fn test_bernoulli_extremes() {
    let mut rng = SamplerRng::new(5);
    for _ in 0..100 {
        assert!(!rng.bernoulli(0.0));
        assert!(rng.bernoulli(1.0));
    }
}

#[test]
fn test_unit_f64_range() {
    let mut rng = SamplerRng::new(5);
    for _ in 0..100 {
        let x = rng.unit_f64();
        assert!((0.0..1.0).contains(&x));
    }
}

#[test]
fn test_selection_weights_normalized() {
    let weights = SelectionWeights::new(&[1.0, 3.0, 0.0]).unwrap();
    assert_eq!(weights.len(), 3);
    let p = weights.probabilities();
    assert_relative_eq!(p[0], 0.25);
    assert_relative_eq!(p[1], 0.75);
    assert_relative_eq!(p[2], 0.0);
}

#[test]
fn test_pick_never_selects_zero_weight() {
    let weights = SelectionWeights::new(&[0.0, 2.0, 0.0, 1.0]).unwrap();
    let mut rng = SamplerRng::new(9);
    for _ in 0..1000 {
        let i = rng.pick(&weights);
        assert!(i == 1 || i == 3, "picked zero-weight choice {}", i);
    }
}

#[test]
fn test_selection_weights_errors() {
    assert_eq!(
        SelectionWeights::new(&[]).err(),
        Some(FramePairError::NoSamplableDataset)
    );
    assert_eq!(
        SelectionWeights::new(&[0.0, 0.0]).err(),
        Some(FramePairError::NoSamplableDataset)
    );
    assert!(matches!(
        SelectionWeights::new(&[1.0, -1.0]),
        Err(FramePairError::InvalidArgument(_))
    ));
    assert!(matches!(
        SelectionWeights::new(&[f64::NAN]),
        Err(FramePairError::InvalidArgument(_))
    ));
}

#[test]
fn test_worker_seeds_are_distinct_and_stable() {
    let seeds: HashSet<u64> = (0..64).map(|w| derive_worker_seed(1234, w)).collect();
    assert_eq!(seeds.len(), 64);
    assert_eq!(derive_worker_seed(1234, 3), derive_worker_seed(1234, 3));
    assert_ne!(derive_worker_seed(1234, 0), derive_worker_seed(1235, 0));
}

#[test]
fn test_selection_weights_near_f64_max() {
    let weights = SelectionWeights::new(&[1e308, 1e308]).unwrap();
    assert_relative_eq!(weights.probabilities()[0], 0.5);
    assert_relative_eq!(weights.probabilities()[1], 0.5);
    let mut rng = SamplerRng::new(1);
    for _ in 0..100 {
        assert!(rng.pick(&weights) < 2);
    }

    let skewed = SelectionWeights::new(&[f64::MAX, f64::MAX / 3.0, 0.0]).unwrap();
    assert_relative_eq!(skewed.probabilities()[0], 0.75);
    assert_relative_eq!(skewed.probabilities()[2], 0.0);
}

#[test]
fn test_sample_distinct() {
    let mut rng = SamplerRng::new(12);
    for _ in 0..100 {
        let values = rng.sample_distinct(1_000_000, 4).unwrap();
        assert_eq!(values.len(), 4);
        let unique: HashSet<usize> = values.iter().copied().collect();
        assert_eq!(unique.len(), 4);
        assert!(values.iter().all(|&v| v < 1_000_000));
    }
    let mut all = rng.sample_distinct(5, 5).unwrap();
    all.sort_unstable();
    assert_eq!(all, vec![0, 1, 2, 3, 4]);
    assert!(rng.sample_distinct(3, 4).is_err());
}
