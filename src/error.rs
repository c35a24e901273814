use thiserror::Error;

/// Fatal pipeline errors. Per-region failures are not errors at this level;
/// they are reported through `RegionOutcome` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("score map is {score_dims:?} but geometry channels are {geometry_dims:?}")]
    ShapeMismatch {
        score_dims: (usize, usize),
        geometry_dims: (usize, usize),
    },

    #[error("geometry map must have 5 channels, got {channels}")]
    GeometryChannels { channels: usize },

    #[error("image dimensions must be positive, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// Failure reported by the external recognition capability for one region.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("text recognition failed: {0}")]
pub struct RecognitionError(pub String);

impl RecognitionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
