// framepair-data/src/samplers/sequence_sampler.rs

use super::traits::{Sampler, SamplerBase};
use super::weights::{dataset_selection_weights, DATASET_RATIOS};
use crate::datasets::DatasetHandle;
use crate::task::TaskFamily;
use crate::unit::TrainingUnit;
use framepair_core::{FramePairError, HyperParam, HyperParamSchema, SamplerRng, SelectionWeights};
use log::debug;
use once_cell::sync::Lazy;

pub const NUM_FRAMES: &str = "num_frames";
pub const FRAME_SPAN_MAX: &str = "frame_span_max";

static VOS_SCHEMA: Lazy<HyperParamSchema> = Lazy::new(|| {
    HyperParamSchema::new()
        .with(NUM_FRAMES, 2)
        .with(FRAME_SPAN_MAX, 8)
        .with(DATASET_RATIOS, Vec::<f64>::new())
});

static TRACK_SCHEMA: Lazy<HyperParamSchema> = Lazy::new(|| {
    HyperParamSchema::new()
        .with(NUM_FRAMES, 3)
        .with(FRAME_SPAN_MAX, 6)
        .with(DATASET_RATIOS, Vec::<f64>::new())
});

#[derive(Debug, Clone)]
struct WindowSettings {
    num_frames: usize,
    span: usize,
    weights: SelectionWeights,
}

/// Draws `num_frames` sorted indices from a window of at most `span + 1`
/// consecutive indices of a dataset of length `len` (`len > 0`).
///
/// Indices are distinct when the window is large enough, otherwise some repeat.
fn draw_window(
    rng: &mut SamplerRng,
    len: usize,
    num_frames: usize,
    span: usize,
) -> Result<Vec<usize>, FramePairError> {
    let window = len.min(span.saturating_add(1));
    let start = rng.index(len - window + 1)?;
    let mut indices = if window >= num_frames {
        rng.sample_distinct(window, num_frames)?
            .into_iter()
            .map(|offset| start + offset)
            .collect()
    } else {
        (0..num_frames)
            .map(|_| rng.range_inclusive(start, start + window - 1))
            .collect::<Result<Vec<_>, _>>()?
    };
    indices.sort_unstable();
    Ok(indices)
}

/// Samples ordered frame sequences from a short window of one dataset.
///
/// Registered as `vos/uniform` (frame pairs with masks) and as
/// `track/sequence` (longer sequences for memory-based trackers); only the
/// task family and the defaults differ.
#[derive(Debug)]
pub struct SequenceSampler {
    task: TaskFamily,
    base: SamplerBase,
    settings: Option<WindowSettings>,
}

impl SequenceSampler {
    pub fn new(task: TaskFamily, datasets: Vec<DatasetHandle>, seed: u64) -> Self {
        SequenceSampler {
            task,
            base: SamplerBase::new(datasets, Self::default_hyper_params(task), seed),
            settings: None,
        }
    }

    pub fn default_hyper_params(task: TaskFamily) -> &'static HyperParamSchema {
        match task {
            TaskFamily::Track => &TRACK_SCHEMA,
            TaskFamily::Vos => &VOS_SCHEMA,
        }
    }

    pub fn vos_schema() -> &'static HyperParamSchema {
        Self::default_hyper_params(TaskFamily::Vos)
    }

    pub fn track_schema() -> &'static HyperParamSchema {
        Self::default_hyper_params(TaskFamily::Track)
    }

    /// Registry constructor for `vos/uniform`.
    pub fn boxed_vos(datasets: Vec<DatasetHandle>, seed: u64) -> Box<dyn Sampler> {
        Box::new(Self::new(TaskFamily::Vos, datasets, seed))
    }

    /// Registry constructor for `track/sequence`.
    pub fn boxed_track(datasets: Vec<DatasetHandle>, seed: u64) -> Box<dyn Sampler> {
        Box::new(Self::new(TaskFamily::Track, datasets, seed))
    }

    pub fn task(&self) -> TaskFamily {
        self.task
    }
}

impl Sampler for SequenceSampler {
    fn base(&self) -> &SamplerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut SamplerBase {
        &mut self.base
    }

    fn derive_params(&mut self) -> Result<(), FramePairError> {
        let hps = self.base.hyper_params();
        let num_frames = hps.get_usize(NUM_FRAMES)?;
        if num_frames == 0 {
            return Err(FramePairError::InvalidHyperParam {
                key: NUM_FRAMES.to_string(),
                expected: "at least 1".to_string(),
                found: HyperParam::Int(0).to_string(),
            });
        }
        let span = hps.get_usize(FRAME_SPAN_MAX)?;
        let ratios = hps.get_f64_list(DATASET_RATIOS)?;
        let weights = dataset_selection_weights(self.base.datasets(), &ratios)?;
        debug!(
            "SequenceSampler ({}): {} frames within span {}, dataset probabilities {:?}",
            self.task,
            num_frames,
            span,
            weights.probabilities()
        );
        self.settings = Some(WindowSettings {
            num_frames,
            span,
            weights,
        });
        Ok(())
    }

    fn draw(&mut self) -> Result<TrainingUnit, FramePairError> {
        let settings = self.settings.as_ref().ok_or_else(|| FramePairError::NotReady {
            state: self.base.state().to_string(),
        })?;
        let dataset = self.base.rng_mut().pick(&settings.weights);
        let len = self.base.dataset_len(dataset);
        let indices = draw_window(
            self.base.rng_mut(),
            len,
            settings.num_frames,
            settings.span,
        )?;
        let frames = indices
            .into_iter()
            .map(|index| self.base.fetch(dataset, index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TrainingUnit::new(self.task, frames))
    }
}

#[cfg(test)]
#[path = "sequence_sampler_test.rs"]
mod tests;
