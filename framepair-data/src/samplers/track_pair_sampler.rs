// framepair-data/src/samplers/track_pair_sampler.rs

use super::traits::{Sampler, SamplerBase};
use super::weights::{dataset_selection_weights, DATASET_RATIOS};
use crate::datasets::DatasetHandle;
use crate::task::TaskFamily;
use crate::unit::TrainingUnit;
use framepair_core::{FramePairError, HyperParamSchema, SelectionWeights};
use log::debug;
use once_cell::sync::Lazy;

pub const PAIR_GAP_MAX: &str = "pair_gap_max";
pub const NEGATIVE_PAIR_RATIO: &str = "negative_pair_ratio";

static SCHEMA: Lazy<HyperParamSchema> = Lazy::new(|| {
    HyperParamSchema::new()
        .with(PAIR_GAP_MAX, 3)
        .with(NEGATIVE_PAIR_RATIO, 0.0)
        .with(DATASET_RATIOS, Vec::<f64>::new())
});

#[derive(Debug, Clone)]
struct PairSettings {
    gap: usize,
    negative_ratio: f64,
    weights: SelectionWeights,
}

/// Samples template/search frame pairs for tracking.
///
/// A dataset is chosen by weight, then an anchor frame uniformly, then a
/// partner frame at most `pair_gap_max` indices away. A fraction
/// `negative_pair_ratio` of the pairs instead takes its partner from a
/// weighted random dataset; within the anchor's own dataset the partner is
/// kept more than `pair_gap_max` away whenever the dataset is long enough.
#[derive(Debug)]
pub struct TrackPairSampler {
    base: SamplerBase,
    settings: Option<PairSettings>,
}

impl TrackPairSampler {
    pub fn new(datasets: Vec<DatasetHandle>, seed: u64) -> Self {
        TrackPairSampler {
            base: SamplerBase::new(datasets, Self::default_hyper_params(), seed),
            settings: None,
        }
    }

    /// Declared options and their defaults.
    pub fn default_hyper_params() -> &'static HyperParamSchema {
        &SCHEMA
    }

    /// Registry constructor.
    pub fn boxed(datasets: Vec<DatasetHandle>, seed: u64) -> Box<dyn Sampler> {
        Box::new(Self::new(datasets, seed))
    }

    /// Selection probability of each dataset, once ready.
    pub fn dataset_probabilities(&self) -> Option<&[f64]> {
        self.settings.as_ref().map(|s| s.weights.probabilities())
    }
}

impl Sampler for TrackPairSampler {
    fn base(&self) -> &SamplerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SamplerBase {
        &mut self.base
    }

    fn derive_params(&mut self) -> Result<(), FramePairError> {
        let hps = self.base.hyper_params();
        let gap = hps.get_usize(PAIR_GAP_MAX)?;
        let negative_ratio = hps.get_probability(NEGATIVE_PAIR_RATIO)?;
        let ratios = hps.get_f64_list(DATASET_RATIOS)?;
        let weights = dataset_selection_weights(self.base.datasets(), &ratios)?;
        debug!(
            "TrackPairSampler: gap {}, negative ratio {}, dataset probabilities {:?}",
            gap,
            negative_ratio,
            weights.probabilities()
        );
        self.settings = Some(PairSettings {
            gap,
            negative_ratio,
            weights,
        });
        Ok(())
    }

    fn draw(&mut self) -> Result<TrainingUnit, FramePairError> {
        let settings = self.settings.as_ref().ok_or_else(|| FramePairError::NotReady {
            state: self.base.state().to_string(),
        })?;
        let rng = self.base.rng_mut();
        let dataset = rng.pick(&settings.weights);
        let negative = rng.bernoulli(settings.negative_ratio);
        // Selection weights are zero for empty datasets, so len > 0 here.
        let len = self.base.dataset_len(dataset);
        let anchor = self.base.rng_mut().index(len)?;

        let low = anchor.saturating_sub(settings.gap);
        let high = anchor.saturating_add(settings.gap).min(len - 1);

        if negative {
            let other = self.base.rng_mut().pick(&settings.weights);
            let near = high - low + 1;
            let other_index = if other == dataset && len > near {
                // Skip the positive neighbourhood [low, high] of the anchor.
                let k = self.base.rng_mut().index(len - near)?;
                if k < low {
                    k
                } else {
                    k + near
                }
            } else {
                let other_len = self.base.dataset_len(other);
                self.base.rng_mut().index(other_len)?
            };
            let frames = vec![
                self.base.fetch(dataset, anchor)?,
                self.base.fetch(other, other_index)?,
            ];
            return Ok(TrainingUnit::negative(TaskFamily::Track, frames));
        }

        let partner = self.base.rng_mut().range_inclusive(low, high)?;
        let (first, second) = (anchor.min(partner), anchor.max(partner));
        let frames = vec![
            self.base.fetch(dataset, first)?,
            self.base.fetch(dataset, second)?,
        ];
        Ok(TrainingUnit::new(TaskFamily::Track, frames))
    }
}

#[cfg(test)]
#[path = "track_pair_sampler_test.rs"]
mod tests;
