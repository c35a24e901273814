use ndarray::{Array2, Array3, Axis};

use crate::{PipelineError, Rect, TextBox};

/// Downsampling of the detector's output grid relative to its resized input.
/// Fixed by the network architecture.
pub const FEATURE_STRIDE: f32 = 4.0;

const CH_TOP: usize = 0;
const CH_RIGHT: usize = 1;
const CH_BOTTOM: usize = 2;
const CH_LEFT: usize = 3;
const CH_ANGLE: usize = 4;
const GEOMETRY_CHANNELS: usize = 5;

/// Per-cell text confidence grid, one value in `[0,1]` per output cell.
pub struct ScoreMap {
    grid: Array2<f32>,
}

impl ScoreMap {
    pub fn new(grid: Array2<f32>) -> Self {
        Self { grid }
    }

    pub fn dims(&self) -> (usize, usize) {
        self.grid.dim()
    }
}

/// Rotated-box geometry grids aligned with the score map, shape
/// `(5, rows, cols)`: distances to the four box sides, then the angle in
/// radians.
pub struct GeometryMap {
    channels: Array3<f32>,
}

impl GeometryMap {
    pub fn new(channels: Array3<f32>) -> Result<Self, PipelineError> {
        let count = channels.len_of(Axis(0));
        if count != GEOMETRY_CHANNELS {
            return Err(PipelineError::GeometryChannels { channels: count });
        }
        Ok(Self { channels })
    }

    pub fn dims(&self) -> (usize, usize) {
        let (_, rows, cols) = self.channels.dim();
        (rows, cols)
    }

    fn at(&self, channel: usize, row: usize, col: usize) -> f32 {
        self.channels[[channel, row, col]]
    }
}

/// Decodes the dense detector output into candidate boxes, row-major.
///
/// Cells scoring below `threshold` yield nothing. The box rotates about its
/// bottom-right reference point, so that corner is reconstructed first and
/// the start corner derived by subtracting the full extents.
pub fn decode<'a>(
    scores: &'a ScoreMap,
    geometry: &'a GeometryMap,
    threshold: f32,
) -> impl Iterator<Item = TextBox> + 'a {
    scores
        .grid
        .indexed_iter()
        .filter(move |(_, score)| **score >= threshold)
        .map(move |((row, col), score)| {
            let offset_x = col as f32 * FEATURE_STRIDE;
            let offset_y = row as f32 * FEATURE_STRIDE;

            let d_top = geometry.at(CH_TOP, row, col);
            let d_right = geometry.at(CH_RIGHT, row, col);
            let d_bottom = geometry.at(CH_BOTTOM, row, col);
            let d_left = geometry.at(CH_LEFT, row, col);
            let angle = geometry.at(CH_ANGLE, row, col);
            let (sin, cos) = angle.sin_cos();

            let height = d_top + d_bottom;
            let width = d_right + d_left;

            let end_x = offset_x + cos * d_right + sin * d_bottom;
            let end_y = offset_y - sin * d_right + cos * d_bottom;

            TextBox {
                score: *score,
                rect: Rect {
                    start_x: end_x - width,
                    start_y: end_y - height,
                    end_x,
                    end_y,
                },
                cell: (row, col),
            }
        })
}
