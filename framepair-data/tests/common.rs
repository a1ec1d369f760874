use framepair_core::FramePairError;
use framepair_data::{Dataset, DatasetHandle, Record, VecDataset};
use std::sync::{Arc, Mutex};

// Helper datasets shared by the integration tests.
// Added allow(dead_code) because not every test file uses every helper.
#[allow(dead_code)]
pub fn frames_dataset(name: &str, len: usize) -> DatasetHandle {
    let records: Vec<Record> = (0..len)
        .map(|i| Record::with_box(format!("{}/{:04}.jpg", name, i), [1.0, 2.0, 3.0, 4.0]))
        .collect();
    Arc::new(VecDataset::new(records).with_name(name))
}

/// Wraps a dataset and records every index asked of it.
#[allow(dead_code)]
pub struct RecordingDataset {
    inner: DatasetHandle,
    requested: Mutex<Vec<usize>>,
}

#[allow(dead_code)]
impl RecordingDataset {
    pub fn new(inner: DatasetHandle) -> Arc<Self> {
        Arc::new(RecordingDataset {
            inner,
            requested: Mutex::new(Vec::new()),
        })
    }

    pub fn requested(&self) -> Vec<usize> {
        self.requested.lock().unwrap().clone()
    }
}

impl Dataset for RecordingDataset {
    type Item = Record;

    fn get(&self, index: usize) -> Result<Record, FramePairError> {
        self.requested.lock().unwrap().push(index);
        self.inner.get(index)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
