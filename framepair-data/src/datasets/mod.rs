pub mod record;
pub mod traits;
pub mod vec_dataset;

pub use record::{Annotation, Record};
pub use traits::{Dataset, DatasetHandle};
pub use vec_dataset::VecDataset;
