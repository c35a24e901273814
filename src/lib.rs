pub mod east;
mod error;
pub mod nms;
pub mod recognize;
pub mod region;
mod result;
pub mod util;

use float_ord::FloatOrd;
use image::DynamicImage;
pub use result::*;
use tracing::instrument;

use east::{GeometryMap, ScoreMap};
pub use error::{PipelineError, RecognitionError};
pub use recognize::RecognizeText;

/// Thresholds and behavior switches for one pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub score_threshold: f32,
    pub overlap_threshold: f32,
    pub reading_order: bool,
}

impl PipelineOptions {
    pub fn score_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold;
        self
    }

    pub fn overlap_threshold(mut self, threshold: f32) -> Self {
        self.overlap_threshold = threshold;
        self
    }

    /// Re-sorts surviving boxes top-to-bottom, left-to-right before
    /// extraction. Off by default; the default ordering follows suppression's
    /// confidence-descending selection.
    pub fn reading_order(mut self, enabled: bool) -> Self {
        self.reading_order = enabled;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            score_threshold: 0.5,
            overlap_threshold: 0.4,
            reading_order: false,
        }
    }
}

/// End-to-end text localization and extraction over one label scan:
/// decode, suppress, extract, recognize.
pub struct LabelPipeline {
    options: PipelineOptions,
}

impl LabelPipeline {
    pub fn new() -> Self {
        Self::with_options(PipelineOptions::default())
    }

    pub fn with_options(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Runs the full pipeline for one image. Fails fast only on shape
    /// problems; per-region failures end up in the output's status trail.
    #[instrument(skip(self, image, scores, geometry, recognizer))]
    pub fn run<R>(
        &self,
        image: &DynamicImage,
        scores: &ScoreMap,
        geometry: &GeometryMap,
        recognizer: &R,
    ) -> Result<PipelineOutput, PipelineError>
    where
        R: RecognizeText + ?Sized,
    {
        if image.width() == 0 || image.height() == 0 {
            return Err(PipelineError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }
        if scores.dims() != geometry.dims() {
            return Err(PipelineError::ShapeMismatch {
                score_dims: scores.dims(),
                geometry_dims: geometry.dims(),
            });
        }

        let candidates: Vec<TextBox> =
            east::decode(scores, geometry, self.options.score_threshold).collect();
        log::debug!("{} candidate boxes above threshold", candidates.len());

        let mut boxes = nms::suppress(
            candidates,
            self.options.score_threshold,
            self.options.overlap_threshold,
        );
        log::debug!("{} boxes survived suppression", boxes.len());

        if self.options.reading_order {
            sort_reading_order(&mut boxes);
        }

        let regions = boxes
            .into_iter()
            .map(|candidate| region::extract(image, candidate))
            .collect::<Vec<_>>();

        #[cfg(feature = "debug")]
        for (i, result) in regions.iter().enumerate() {
            if let region::ExtractionResult::Region(text_region) = result {
                text_region
                    .pixels
                    .to_image()
                    .save(format!("part_images/{i}.png"))
                    .unwrap();
            }
        }

        Ok(recognize::recognize_all(regions, recognizer))
    }
}

impl Default for LabelPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Reorders boxes into top-to-bottom, left-to-right reading order.
pub fn sort_reading_order(boxes: &mut [TextBox]) {
    boxes.sort_by_key(|candidate| {
        (
            FloatOrd(candidate.rect.start_y),
            FloatOrd(candidate.rect.start_x),
        )
    });
}
