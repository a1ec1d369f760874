use crate::datasets::record::Record;
use framepair_core::FramePairError;
use std::sync::Arc;

/// Represents a dataset that can be accessed by index.
///
/// A dataset is a fixed-size collection of items. Its length and the item at
/// each index must stay stable for as long as a sampler holds it.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    ///
    /// This type must be `Send` and `'static` so that each worker can move
    /// sampled items across threads.
    type Item: Send + 'static;

    /// Returns the item at the given index.
    ///
    /// # Arguments
    ///
    /// * `index` - The index of the item to retrieve.
    ///
    /// # Errors
    ///
    /// Returns `FramePairError::IndexOutOfBounds` if the index is out of bounds,
    /// or `FramePairError::RecordUnavailable` if the record could not be
    /// materialized (corrupt or missing media).
    fn get(&self, index: usize) -> Result<Self::Item, FramePairError>;

    /// Returns the total number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human readable name, used in logs and error messages.
    fn name(&self) -> &str {
        "dataset"
    }
}

/// Shared, read-only handle on a dataset of frame records, as held by samplers.
pub type DatasetHandle = Arc<dyn Dataset<Item = Record> + Send + Sync>;
