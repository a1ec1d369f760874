//! # SampleStream
//!
//! Wraps a ready sampler into an `Iterator` that never ends: every call to
//! `next` is one `sample()` call. Consumers stop by dropping the stream.
//!
//! ```rust
//! use std::sync::Arc;
//! use framepair_data::builder::{build_sampler, SamplerConfig};
//! use framepair_data::datasets::{Record, VecDataset, DatasetHandle};
//! use framepair_data::stream::SampleStream;
//! use framepair_data::TaskFamily;
//!
//! let records: Vec<Record> = (0..5).map(|i| Record::with_box(format!("{:03}.jpg", i), [0.0, 0.0, 1.0, 1.0])).collect();
//! let dataset: DatasetHandle = Arc::new(VecDataset::new(records));
//! let config = SamplerConfig::new(TaskFamily::Track, "uniform").with_seed(7);
//! let sampler = build_sampler(&config, vec![dataset]).expect("valid config");
//! let units: Vec<_> = SampleStream::new(sampler).take(3).collect();
//! assert_eq!(units.len(), 3);
//! ```

use crate::samplers::Sampler;
use crate::unit::TrainingUnit;
use framepair_core::FramePairError;

/// Endless iterator over the training units of one sampler.
#[derive(Debug)]
pub struct SampleStream {
    sampler: Box<dyn Sampler>,
}

impl SampleStream {
    pub fn new(sampler: Box<dyn Sampler>) -> Self {
        SampleStream { sampler }
    }

    pub fn sampler(&self) -> &dyn Sampler {
        self.sampler.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn Sampler> {
        self.sampler
    }
}

impl Iterator for SampleStream {
    type Item = Result<TrainingUnit, FramePairError>;

    /// Always `Some`: errors are yielded, the harness decides whether to skip
    /// the step or abort.
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.sampler.sample())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samplers::TrackPairSampler;
    use crate::test_utils::frames_dataset;

    #[test]
    fn test_stream_does_not_end() {
        let mut sampler = TrackPairSampler::new(vec![frames_dataset("a", 4)], 1);
        sampler.update_params().unwrap();
        let stream = SampleStream::new(Box::new(sampler));
        let units: Vec<_> = stream.take(500).collect();
        assert_eq!(units.len(), 500);
        assert!(units.iter().all(|u| u.is_ok()));
    }

    #[test]
    fn test_stream_yields_errors_without_ending() {
        let sampler = TrackPairSampler::new(vec![frames_dataset("a", 4)], 1);
        let mut stream = SampleStream::new(Box::new(sampler));
        for _ in 0..3 {
            assert!(matches!(
                stream.next(),
                Some(Err(FramePairError::NotReady { .. }))
            ));
        }
    }
}
