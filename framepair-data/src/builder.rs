//! Construction-by-name: the single entry point orchestration code needs.

use crate::datasets::DatasetHandle;
use crate::samplers::registry::{resolve_sampler, SamplerConstructor, SamplerRegistry};
use crate::samplers::Sampler;
use crate::task::TaskFamily;
use framepair_core::{derive_worker_seed, FramePairError, HyperParam, HyperParams};
use log::info;

/// Everything needed to build a ready sampler, as handed over by the
/// configuration layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerConfig {
    pub task: TaskFamily,
    pub name: String,
    pub overrides: HyperParams,
    pub seed: u64,
}

impl SamplerConfig {
    pub fn new(task: TaskFamily, name: &str) -> Self {
        SamplerConfig {
            task,
            name: name.to_string(),
            overrides: HyperParams::new(),
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_override(mut self, key: &str, value: impl Into<HyperParam>) -> Self {
        self.overrides.insert(key, value);
        self
    }
}

fn construct(
    constructor: SamplerConstructor,
    config: &SamplerConfig,
    datasets: Vec<DatasetHandle>,
    seed: u64,
) -> Result<Box<dyn Sampler>, FramePairError> {
    let mut sampler = constructor(datasets, seed);
    sampler.set_hyper_params(&config.overrides)?;
    sampler.update_params()?;
    Ok(sampler)
}

/// Resolves `config` in the process-wide registry and returns a sampler in
/// the ready state.
///
/// # Errors
///
/// * `FramePairError::UnknownSampler` for an unregistered name.
/// * `FramePairError::UnknownKey` if an override is not declared.
/// * Whatever the variant's `update_params` reports (e.g. `NoSamplableDataset`).
pub fn build_sampler(
    config: &SamplerConfig,
    datasets: Vec<DatasetHandle>,
) -> Result<Box<dyn Sampler>, FramePairError> {
    let entry = resolve_sampler(config.task, &config.name)?;
    (entry.schema)().validate(&config.overrides)?;
    construct(entry.constructor, config, datasets, config.seed)
}

/// Same as [`build_sampler`] but against an explicit registry.
pub fn build_sampler_from(
    registry: &SamplerRegistry,
    config: &SamplerConfig,
    datasets: Vec<DatasetHandle>,
) -> Result<Box<dyn Sampler>, FramePairError> {
    let entry = registry.resolve(config.task, &config.name)?;
    (entry.schema)().validate(&config.overrides)?;
    construct(entry.constructor, config, datasets, config.seed)
}

/// Builds one sampler per data-loading worker.
///
/// Worker `i` is seeded with `derive_worker_seed(config.seed, i)`, so workers
/// draw independent streams and each stream is reproducible.
pub fn build_worker_samplers(
    config: &SamplerConfig,
    datasets: &[DatasetHandle],
    num_workers: usize,
) -> Result<Vec<Box<dyn Sampler>>, FramePairError> {
    let entry = resolve_sampler(config.task, &config.name)?;
    (entry.schema)().validate(&config.overrides)?;
    (0..num_workers)
        .map(|worker| {
            let seed = derive_worker_seed(config.seed, worker as u64);
            info!(
                "Building sampler {}/{} for worker {} with seed {}",
                config.task, config.name, worker, seed
            );
            construct(entry.constructor, config, datasets.to_vec(), seed)
        })
        .collect()
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
