use crate::datasets::Record;
use crate::task::TaskFamily;

/// One frame taken into a training unit, with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledFrame {
    /// Position of the source dataset in the sampler's dataset list.
    pub dataset: usize,
    /// Index of the record inside that dataset.
    pub index: usize,
    pub record: Record,
}

/// The value produced by one sampling step: an ordered pair or sequence of
/// frames. Owned by whoever receives it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingUnit {
    pub task: TaskFamily,
    pub frames: Vec<SampledFrame>,
    /// `true` when the frames were deliberately drawn from unrelated places.
    pub negative: bool,
}

impl TrainingUnit {
    pub fn new(task: TaskFamily, frames: Vec<SampledFrame>) -> Self {
        TrainingUnit {
            task,
            frames,
            negative: false,
        }
    }

    pub fn negative(task: TaskFamily, frames: Vec<SampledFrame>) -> Self {
        TrainingUnit {
            task,
            frames,
            negative: true,
        }
    }

    /// `(dataset, index)` of every frame, in order.
    pub fn indices(&self) -> Vec<(usize, usize)> {
        self.frames.iter().map(|f| (f.dataset, f.index)).collect()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
