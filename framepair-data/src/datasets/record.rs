/// Annotation attached to a single frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Frame without annotation (e.g. a distractor frame).
    None,
    /// Axis-aligned box as `[x0, y0, x1, y1]`.
    BoundingBox([f32; 4]),
    /// Storage key of a segmentation mask.
    Mask(String),
}

/// One record of a dataset: the storage key of a frame plus its annotation.
///
/// Raw media is not decoded at this layer; `frame` is whatever key the storage
/// backend understands.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub frame: String,
    pub annotation: Annotation,
}

impl Record {
    pub fn new(frame: impl Into<String>, annotation: Annotation) -> Self {
        Record {
            frame: frame.into(),
            annotation,
        }
    }

    pub fn with_box(frame: impl Into<String>, bbox: [f32; 4]) -> Self {
        Self::new(frame, Annotation::BoundingBox(bbox))
    }

    pub fn with_mask(frame: impl Into<String>, mask: impl Into<String>) -> Self {
        Self::new(frame, Annotation::Mask(mask.into()))
    }
}
