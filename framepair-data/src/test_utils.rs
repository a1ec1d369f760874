use crate::datasets::{Dataset, DatasetHandle, Record, VecDataset};
use framepair_core::FramePairError;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// In-memory dataset of `len` boxed frames named `<name>/<index>.jpg`.
pub(crate) fn frames_dataset(name: &str, len: usize) -> DatasetHandle {
    let records = (0..len)
        .map(|i| Record::with_box(format!("{}/{:04}.jpg", name, i), [0.0, 0.0, 16.0, 16.0]))
        .collect::<Vec<_>>();
    Arc::new(VecDataset::new(records).with_name(name))
}

/// Dataset whose records at `broken` indices fail to decode. Every requested
/// index is logged so tests can check access bounds.
pub(crate) struct FlakyDataset {
    len: usize,
    broken: HashSet<usize>,
    accessed: Mutex<Vec<usize>>,
}

impl FlakyDataset {
    pub(crate) fn new(len: usize, broken: impl IntoIterator<Item = usize>) -> Arc<Self> {
        Arc::new(FlakyDataset {
            len,
            broken: broken.into_iter().collect(),
            accessed: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn accessed(&self) -> Vec<usize> {
        self.accessed.lock().unwrap().clone()
    }
}

impl Dataset for FlakyDataset {
    type Item = Record;

    fn get(&self, index: usize) -> Result<Record, FramePairError> {
        self.accessed.lock().unwrap().push(index);
        if self.broken.contains(&index) {
            return Err(FramePairError::RecordUnavailable {
                dataset: "flaky".to_string(),
                index,
                reason: "corrupt frame".to_string(),
            });
        }
        Ok(Record::with_box(format!("flaky/{:04}.jpg", index), [0.0, 0.0, 8.0, 8.0]))
    }

    fn len(&self) -> usize {
        self.len
    }

    fn name(&self) -> &str {
        "flaky"
    }
}
