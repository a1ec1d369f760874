//! Deterministic random number generation for sampler instances.
//!
//! Each sampler owns exactly one [`SamplerRng`]. Two generators built from the
//! same seed and driven through the same calls yield the same values, which is
//! what makes a worker's stream of training units reproducible.

use crate::error::FramePairError;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

fn splitmix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Derives the seed of one data-loading worker from a base seed.
///
/// For a fixed `base_seed`, distinct worker indices always map to distinct
/// seeds (the mix is a bijection), and neighbouring workers get unrelated bit
/// patterns.
pub fn derive_worker_seed(base_seed: u64, worker_index: u64) -> u64 {
    splitmix64(base_seed.wrapping_add(worker_index.wrapping_mul(GOLDEN_GAMMA)))
}

/// Seeded generator exposing only the draws samplers need.
#[derive(Debug, Clone)]
pub struct SamplerRng {
    seed: u64,
    inner: StdRng,
}

impl SamplerRng {
    pub fn new(seed: u64) -> Self {
        SamplerRng {
            seed,
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// The seed this generator was constructed with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `[0, upper)`.
    ///
    /// # Errors
    ///
    /// Returns `FramePairError::InvalidArgument` if `upper` is zero.
    pub fn index(&mut self, upper: usize) -> Result<usize, FramePairError> {
        if upper == 0 {
            return Err(FramePairError::InvalidArgument(
                "cannot draw an index from an empty range".to_string(),
            ));
        }
        Ok(self.inner.gen_range(0..upper))
    }

    /// Uniform value in the closed range `[low, high]`.
    pub fn range_inclusive(&mut self, low: usize, high: usize) -> Result<usize, FramePairError> {
        if low > high {
            return Err(FramePairError::InvalidArgument(format!(
                "empty range [{}, {}]",
                low, high
            )));
        }
        Ok(self.inner.gen_range(low..=high))
    }

    /// Uniformly picks one element, `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.inner)
    }

    /// `amount` distinct values from `[0, upper)`, in random order.
    ///
    /// Costs O(amount) rather than O(upper).
    pub fn sample_distinct(&mut self, upper: usize, amount: usize) -> Result<Vec<usize>, FramePairError> {
        if amount > upper {
            return Err(FramePairError::InvalidArgument(format!(
                "cannot draw {} distinct values from {}",
                amount, upper
            )));
        }
        Ok(index::sample(&mut self.inner, upper, amount).into_vec())
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }

    /// Picks an index according to precomputed selection weights.
    pub fn pick(&mut self, weights: &SelectionWeights) -> usize {
        weights.dist.sample(&mut self.inner)
    }

    /// `true` with probability `p`; `p` is clamped to `[0, 1]`.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.inner.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Uniform float in `[0, 1)`.
    pub fn unit_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

/// Normalized selection probabilities over a fixed number of choices
/// (typically one per dataset), ready to be drawn from.
#[derive(Debug, Clone)]
pub struct SelectionWeights {
    probabilities: Vec<f64>,
    dist: WeightedIndex<f64>,
}

impl SelectionWeights {
    /// Builds weights from raw, non-normalized values.
    ///
    /// # Errors
    ///
    /// * `FramePairError::InvalidArgument` if a weight is negative or not finite.
    /// * `FramePairError::NoSamplableDataset` if the list is empty or every weight is zero.
    pub fn new(weights: &[f64]) -> Result<Self, FramePairError> {
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(FramePairError::InvalidArgument(format!(
                "selection weight must be finite and non-negative, got {}",
                bad
            )));
        }
        let max = weights.iter().copied().fold(0.0_f64, f64::max);
        if weights.is_empty() || max <= 0.0 {
            return Err(FramePairError::NoSamplableDataset);
        }
        // Scaled to at most 1.0 each so the running sum stays finite even for
        // weights near f64::MAX.
        let scaled: Vec<f64> = weights.iter().map(|w| w / max).collect();
        let total: f64 = scaled.iter().sum();
        let dist = WeightedIndex::new(scaled.iter().copied())
            .map_err(|e| FramePairError::InvalidArgument(e.to_string()))?;
        Ok(SelectionWeights {
            probabilities: scaled.iter().map(|w| w / total).collect(),
            dist,
        })
    }

    /// Selection probability of each choice; sums to one.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
}

#[cfg(test)]
#[path = "rng_test.rs"]
mod tests;
