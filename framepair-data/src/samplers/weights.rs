use crate::datasets::DatasetHandle;
use framepair_core::{FramePairError, HyperParam, SelectionWeights};

/// Name of the option holding explicit per-dataset ratios.
pub const DATASET_RATIOS: &str = "dataset_ratios";

/// Derives how often each dataset is picked.
///
/// With no explicit `ratios` every dataset is weighted by its length.
/// Otherwise there must be one non-negative ratio per dataset. Empty datasets
/// always get weight zero.
///
/// # Errors
///
/// * `FramePairError::InvalidHyperParam` if `ratios` has the wrong length or a
///   negative entry.
/// * `FramePairError::NoSamplableDataset` if every weight ends up zero.
pub fn dataset_selection_weights(
    datasets: &[DatasetHandle],
    ratios: &[f64],
) -> Result<SelectionWeights, FramePairError> {
    let invalid = |expected: String| FramePairError::InvalidHyperParam {
        key: DATASET_RATIOS.to_string(),
        expected,
        found: HyperParam::from(ratios.to_vec()).to_string(),
    };
    let weights: Vec<f64> = if ratios.is_empty() {
        datasets.iter().map(|d| d.len() as f64).collect()
    } else {
        if ratios.len() != datasets.len() {
            return Err(invalid(format!("{} ratios", datasets.len())));
        }
        if ratios.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(invalid("non-negative ratios".to_string()));
        }
        datasets
            .iter()
            .zip(ratios)
            .map(|(d, r)| if d.is_empty() { 0.0 } else { *r })
            .collect()
    };
    SelectionWeights::new(&weights)
}
