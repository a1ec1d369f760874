use framepair_core::FramePairError;
use std::fmt;
use std::str::FromStr;

/// Training objective family. Each family has its own sampler namespace, so
/// the same short name can mean different strategies in different families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskFamily {
    /// Single object tracking: template/search frame pairs or sequences.
    Track,
    /// Video object segmentation: frames with masks.
    Vos,
}

impl TaskFamily {
    pub const ALL: [TaskFamily; 2] = [TaskFamily::Track, TaskFamily::Vos];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFamily::Track => "track",
            TaskFamily::Vos => "vos",
        }
    }
}

impl fmt::Display for TaskFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskFamily {
    type Err = FramePairError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "track" => Ok(TaskFamily::Track),
            "vos" => Ok(TaskFamily::Vos),
            other => Err(FramePairError::InvalidArgument(format!(
                "unknown task family '{}'",
                other
            ))),
        }
    }
}
