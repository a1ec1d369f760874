// framepair-data/src/samplers/traits.rs

use crate::datasets::DatasetHandle;
use crate::unit::{SampledFrame, TrainingUnit};
use framepair_core::{FramePairError, HyperParamSchema, HyperParams, SamplerRng};
use log::{debug, warn};
use std::fmt;

/// Number of draws a single `sample()` call may make before giving up on
/// transient record failures. Retries are immediate; there is no backoff.
pub const MAX_SAMPLE_ATTEMPTS: usize = 10;

/// Lifecycle of a sampler instance.
///
/// `Constructed -> Configured (optional) -> Ready`. Sampling is only allowed in
/// `Ready`; changing hyper-parameters drops back to `Configured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    Constructed,
    Configured,
    Ready,
}

impl fmt::Display for SamplerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SamplerState::Constructed => "constructed",
            SamplerState::Configured => "configured",
            SamplerState::Ready => "ready",
        };
        f.write_str(s)
    }
}

/// State shared by every sampler variant: the datasets, the hyper-parameter
/// store, the seeded generator and the lifecycle guard.
///
/// Owned by exactly one sampler instance and never shared across threads.
pub struct SamplerBase {
    datasets: Vec<DatasetHandle>,
    hyper_params: HyperParams,
    rng: SamplerRng,
    state: SamplerState,
}

impl SamplerBase {
    /// Creates the base of a sampler.
    ///
    /// # Arguments
    ///
    /// * `datasets` - The datasets to draw from; may be empty, in which case
    ///   `update_params` will refuse to make the sampler ready.
    /// * `schema` - The variant's declared options, copied into a fresh store.
    /// * `seed` - Seed of the sampler's private generator.
    pub fn new(datasets: Vec<DatasetHandle>, schema: &HyperParamSchema, seed: u64) -> Self {
        SamplerBase {
            datasets,
            hyper_params: HyperParams::from_schema(schema),
            rng: SamplerRng::new(seed),
            state: SamplerState::Constructed,
        }
    }

    pub fn datasets(&self) -> &[DatasetHandle] {
        &self.datasets
    }

    /// Length of the dataset at position `dataset`, zero if there is none.
    pub fn dataset_len(&self, dataset: usize) -> usize {
        self.datasets.get(dataset).map_or(0, |d| d.len())
    }

    pub fn hyper_params(&self) -> &HyperParams {
        &self.hyper_params
    }

    pub fn rng_mut(&mut self) -> &mut SamplerRng {
        &mut self.rng
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    /// Applies overrides atomically and moves to `Configured`.
    pub fn set_hyper_params(&mut self, overrides: &HyperParams) -> Result<(), FramePairError> {
        self.hyper_params.merge(overrides)?;
        if self.state != SamplerState::Configured {
            debug!("Sampler (seed {}): {} -> configured", self.seed(), self.state);
        }
        self.state = SamplerState::Configured;
        Ok(())
    }

    pub(crate) fn mark_ready(&mut self) {
        debug!("Sampler (seed {}): {} -> ready", self.seed(), self.state);
        self.state = SamplerState::Ready;
    }

    /// # Errors
    ///
    /// Returns `FramePairError::NotReady` unless `update_params` has run since
    /// the last configuration change.
    pub fn ensure_ready(&self) -> Result<(), FramePairError> {
        match self.state {
            SamplerState::Ready => Ok(()),
            state => Err(FramePairError::NotReady {
                state: state.to_string(),
            }),
        }
    }

    /// Reads one record and tags it with its origin.
    ///
    /// Indices outside `[0, len)` are rejected here and never reach the
    /// dataset.
    pub fn fetch(&self, dataset: usize, index: usize) -> Result<SampledFrame, FramePairError> {
        let handle = self.datasets.get(dataset).ok_or_else(|| {
            FramePairError::InvalidArgument(format!(
                "dataset {} does not exist ({} datasets)",
                dataset,
                self.datasets.len()
            ))
        })?;
        if index >= handle.len() {
            return Err(FramePairError::InvalidArgument(format!(
                "index {} outside dataset '{}' of length {}",
                index,
                handle.name(),
                handle.len()
            )));
        }
        let record = handle.get(index)?;
        Ok(SampledFrame {
            dataset,
            index,
            record,
        })
    }
}

impl fmt::Debug for SamplerBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let datasets: Vec<(&str, usize)> =
            self.datasets.iter().map(|d| (d.name(), d.len())).collect();
        f.debug_struct("SamplerBase")
            .field("datasets", &datasets)
            .field("hyper_params", &self.hyper_params)
            .field("seed", &self.rng.seed())
            .field("state", &self.state)
            .finish()
    }
}

/// A strategy that turns a set of datasets into an endless stream of
/// training units.
///
/// Implementors provide `base`/`base_mut`, `draw` and optionally
/// `derive_params`; the lifecycle guard and the retry policy come from the
/// provided methods.
pub trait Sampler: fmt::Debug + Send {
    fn base(&self) -> &SamplerBase;

    fn base_mut(&mut self) -> &mut SamplerBase;

    /// Derives cached state (e.g. dataset selection weights) from the
    /// finalized hyper-parameters. No-op by default.
    fn derive_params(&mut self) -> Result<(), FramePairError> {
        Ok(())
    }

    /// Makes a single attempt at producing a training unit.
    fn draw(&mut self) -> Result<TrainingUnit, FramePairError>;

    /// Current effective hyper-parameters.
    fn get_hyper_params(&self) -> &HyperParams {
        self.base().hyper_params()
    }

    /// Applies configuration overrides.
    ///
    /// # Errors
    ///
    /// Returns `FramePairError::UnknownKey` if any key is not declared; in that
    /// case nothing is changed.
    fn set_hyper_params(&mut self, overrides: &HyperParams) -> Result<(), FramePairError> {
        self.base_mut().set_hyper_params(overrides)
    }

    /// Finalizes configuration and makes the sampler ready. Must be called
    /// again after every `set_hyper_params`.
    fn update_params(&mut self) -> Result<(), FramePairError> {
        self.derive_params()?;
        self.base_mut().mark_ready();
        Ok(())
    }

    /// Produces the next training unit.
    ///
    /// Transient record failures are retried with a fresh draw, up to
    /// [`MAX_SAMPLE_ATTEMPTS`] draws in total.
    ///
    /// # Errors
    ///
    /// * `FramePairError::NotReady` if `update_params` has not been called.
    /// * `FramePairError::SamplingFailed` once the retry budget is exhausted.
    /// * Any non-transient error from `draw` as is.
    fn sample(&mut self) -> Result<TrainingUnit, FramePairError> {
        self.base().ensure_ready()?;
        let mut last_error = None;
        for attempt in 1..=MAX_SAMPLE_ATTEMPTS {
            match self.draw() {
                Ok(unit) => return Ok(unit),
                Err(e) if e.is_transient() => {
                    warn!(
                        "Sampler (seed {}): attempt {}/{} failed: {}",
                        self.base().seed(),
                        attempt,
                        MAX_SAMPLE_ATTEMPTS,
                        e
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(FramePairError::SamplingFailed {
            attempts: MAX_SAMPLE_ATTEMPTS,
            last_error: last_error.map(|e| e.to_string()).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
#[path = "traits_test.rs"]
mod tests;
