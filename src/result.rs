use crate::error::RecognitionError;

/// Axis bounds of a decoded box, in detector-input pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
}

impl Rect {
    pub fn width(&self) -> f32 {
        self.end_x - self.start_x
    }

    pub fn height(&self) -> f32 {
        self.end_y - self.start_y
    }

    pub fn area(&self) -> f32 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Intersection over union with another rect, 0.0 when disjoint.
    pub fn iou(&self, other: &Rect) -> f32 {
        let start_x = self.start_x.max(other.start_x);
        let start_y = self.start_y.max(other.start_y);
        let end_x = self.end_x.min(other.end_x);
        let end_y = self.end_y.min(other.end_y);

        if end_x <= start_x || end_y <= start_y {
            return 0.0;
        }

        let intersection = (end_x - start_x) * (end_y - start_y);
        let union = self.area() + other.area() - intersection;
        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }
}

/// Candidate text box produced by decoding one cell of the detector grid.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub score: f32,
    pub rect: Rect,
    pub cell: (usize, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegionOutcome {
    Recognized(String),
    Empty,
    ExtractionFailed,
    RecognitionFailed(RecognitionError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionReport {
    pub bounds: TextBox,
    pub outcome: RegionOutcome,
}

/// Terminal pipeline artifact: recognized lines in box-processing order,
/// plus a per-region status trail covering failures as well.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOutput {
    pub lines: Vec<String>,
    pub regions: Vec<RegionReport>,
}

impl PipelineOutput {
    pub fn joined_text(&self) -> String {
        self.lines.join("\n")
    }
}
