pub mod builder;
pub mod datasets;
pub mod samplers;
pub mod stream;
pub mod task;
pub mod unit;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main components
pub use builder::{build_sampler, build_worker_samplers, SamplerConfig};
pub use datasets::{Annotation, Dataset, DatasetHandle, Record, VecDataset};
pub use samplers::{Sampler, SamplerState};
pub use stream::SampleStream;
pub use task::TaskFamily;
pub use unit::{SampledFrame, TrainingUnit};
