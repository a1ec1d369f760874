use thiserror::Error;

/// Custom error type for the framepair sampling engine.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum FramePairError {
    #[error("Unknown hyper-parameter '{key}': not declared in the sampler schema")]
    UnknownKey { key: String },

    #[error("Hyper-parameter '{key}' expected {expected}, got {found}")]
    InvalidHyperParam {
        key: String,
        expected: String,
        found: String,
    },

    #[error("Sampler '{name}' is already registered for task family '{task}'")]
    DuplicateName { task: String, name: String },

    #[error("No sampler named '{name}' is registered for task family '{task}'")]
    UnknownSampler { task: String, name: String },

    #[error("Sampling failed after {attempts} attempts, last error: {last_error}")]
    SamplingFailed { attempts: usize, last_error: String },

    #[error("Sampler is not ready (state: {state}), call update_params() first")]
    NotReady { state: String },

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Record {index} of dataset '{dataset}' is unavailable: {reason}")]
    RecordUnavailable {
        dataset: String,
        index: usize,
        reason: String,
    },

    #[error("No dataset has a non-zero sampling weight")]
    NoSamplableDataset,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FramePairError {
    /// Returns `true` for record-level failures surfaced by a dataset, which a
    /// sampler retries with a fresh draw instead of propagating.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FramePairError::RecordUnavailable { .. } | FramePairError::IndexOutOfBounds { .. }
        )
    }
}
