//! Dispatch-by-name for sampler variants.
//!
//! Variants are registered under a task family and a short name. The
//! process-wide registry is filled with the built-in variants the first time
//! it is touched and is append-only afterwards.

use super::sequence_sampler::SequenceSampler;
use super::track_pair_sampler::TrackPairSampler;
use super::traits::Sampler;
use crate::datasets::DatasetHandle;
use crate::task::TaskFamily;
use framepair_core::{FramePairError, HyperParamSchema};
use log::{error, info, warn};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Builds a sampler from its datasets and seed.
pub type SamplerConstructor = fn(Vec<DatasetHandle>, u64) -> Box<dyn Sampler>;

/// Returns the variant's declared options.
pub type SchemaFn = fn() -> &'static HyperParamSchema;

/// What the registry knows about one variant.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub constructor: SamplerConstructor,
    pub schema: SchemaFn,
}

impl RegistryEntry {
    pub fn new(constructor: SamplerConstructor, schema: SchemaFn) -> Self {
        RegistryEntry {
            constructor,
            schema,
        }
    }
}

/// Name -> variant tables, one per task family.
#[derive(Debug, Clone, Default)]
pub struct SamplerRegistry {
    families: HashMap<TaskFamily, BTreeMap<String, RegistryEntry>>,
}

impl SamplerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in variants.
    pub fn with_builtin() -> Result<Self, FramePairError> {
        let mut registry = Self::new();
        registry.register(
            TaskFamily::Track,
            "uniform",
            RegistryEntry::new(TrackPairSampler::boxed, TrackPairSampler::default_hyper_params),
        )?;
        registry.register(
            TaskFamily::Track,
            "sequence",
            RegistryEntry::new(SequenceSampler::boxed_track, SequenceSampler::track_schema),
        )?;
        registry.register(
            TaskFamily::Vos,
            "uniform",
            RegistryEntry::new(SequenceSampler::boxed_vos, SequenceSampler::vos_schema),
        )?;
        Ok(registry)
    }

    /// # Errors
    ///
    /// Returns `FramePairError::DuplicateName` if `name` is already taken in
    /// `task`.
    pub fn register(
        &mut self,
        task: TaskFamily,
        name: &str,
        entry: RegistryEntry,
    ) -> Result<(), FramePairError> {
        let family = self.families.entry(task).or_default();
        if family.contains_key(name) {
            return Err(FramePairError::DuplicateName {
                task: task.to_string(),
                name: name.to_string(),
            });
        }
        family.insert(name.to_string(), entry);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `FramePairError::UnknownSampler` if nothing is registered under
    /// `name` in `task`.
    pub fn resolve(&self, task: TaskFamily, name: &str) -> Result<RegistryEntry, FramePairError> {
        self.families
            .get(&task)
            .and_then(|family| family.get(name))
            .copied()
            .ok_or_else(|| FramePairError::UnknownSampler {
                task: task.to_string(),
                name: name.to_string(),
            })
    }

    pub fn contains(&self, task: TaskFamily, name: &str) -> bool {
        self.families
            .get(&task)
            .map_or(false, |family| family.contains_key(name))
    }

    /// Registered names of a family, sorted.
    pub fn names(&self, task: TaskFamily) -> Vec<String> {
        self.families
            .get(&task)
            .map(|family| family.keys().cloned().collect())
            .unwrap_or_default()
    }
}

static GLOBAL_REGISTRY: Lazy<RwLock<SamplerRegistry>> = Lazy::new(|| {
    let registry = SamplerRegistry::with_builtin().unwrap_or_else(|e| {
        error!("Failed to register built-in samplers: {}", e);
        SamplerRegistry::new()
    });
    info!(
        "Sampler registry initialized: track {:?}, vos {:?}",
        registry.names(TaskFamily::Track),
        registry.names(TaskFamily::Vos)
    );
    RwLock::new(registry)
});

fn read_registry() -> RwLockReadGuard<'static, SamplerRegistry> {
    GLOBAL_REGISTRY.read().unwrap_or_else(|poisoned| {
        warn!("Sampler registry lock was poisoned. Recovering reader guard.");
        poisoned.into_inner()
    })
}

fn write_registry() -> RwLockWriteGuard<'static, SamplerRegistry> {
    GLOBAL_REGISTRY.write().unwrap_or_else(|poisoned| {
        warn!("Sampler registry lock was poisoned. Recovering writer guard.");
        poisoned.into_inner()
    })
}

/// Adds a variant to the process-wide registry. Meant to be called during
/// start-up, before workers are spawned.
pub fn register_sampler(
    task: TaskFamily,
    name: &str,
    entry: RegistryEntry,
) -> Result<(), FramePairError> {
    write_registry().register(task, name, entry)?;
    info!("Registered sampler '{}' for task family '{}'", name, task);
    Ok(())
}

/// Looks a variant up in the process-wide registry.
pub fn resolve_sampler(task: TaskFamily, name: &str) -> Result<RegistryEntry, FramePairError> {
    read_registry().resolve(task, name)
}

/// Declared options of a registered variant, for configuration tooling.
pub fn schema_of(task: TaskFamily, name: &str) -> Result<&'static HyperParamSchema, FramePairError> {
    Ok((resolve_sampler(task, name)?.schema)())
}

/// Names registered for `task` in the process-wide registry.
pub fn registered_names(task: TaskFamily) -> Vec<String> {
    read_registry().names(task)
}

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;
