use image::{DynamicImage, SubImage};
use tracing::instrument;

use crate::{
    region::ExtractionResult,
    result::{PipelineOutput, RegionOutcome, RegionReport},
    RecognitionError,
};

/// External text-recognition capability, supplied by the caller.
pub trait RecognizeText {
    fn recognize(&self, region: &SubImage<&DynamicImage>) -> Result<String, RecognitionError>;
}

impl<F> RecognizeText for F
where
    F: Fn(&SubImage<&DynamicImage>) -> Result<String, RecognitionError>,
{
    fn recognize(&self, region: &SubImage<&DynamicImage>) -> Result<String, RecognitionError> {
        self(region)
    }
}

/// Runs recognition over every extracted region, in the order the boxes were
/// produced. Failures stay isolated to their region; a failing recognizer
/// never aborts the batch.
#[instrument(level = "debug", skip(regions, recognizer))]
pub fn recognize_all<R>(regions: Vec<ExtractionResult<'_>>, recognizer: &R) -> PipelineOutput
where
    R: RecognizeText + ?Sized,
{
    let mut output = PipelineOutput::default();
    for result in regions {
        let (bounds, outcome) = match result {
            ExtractionResult::OutOfBounds(bounds) => (bounds, RegionOutcome::ExtractionFailed),
            ExtractionResult::Region(region) => match recognizer.recognize(&region.pixels) {
                Ok(text) => {
                    let text = text.trim();
                    if text.is_empty() {
                        (region.source, RegionOutcome::Empty)
                    } else {
                        output.lines.push(text.to_owned());
                        (region.source, RegionOutcome::Recognized(text.to_owned()))
                    }
                }
                Err(err) => {
                    log::warn!("recognition failed for region {:?}: {err}", region.bounds);
                    (region.source, RegionOutcome::RecognitionFailed(err))
                }
            },
        };
        output.regions.push(RegionReport { bounds, outcome });
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{region::extract, Rect, TextBox};
    use image::RgbImage;

    fn candidate(start_x: f32, end_x: f32) -> TextBox {
        TextBox {
            score: 0.9,
            rect: Rect {
                start_x,
                start_y: 10.0,
                end_x,
                end_y: 30.0,
            },
            cell: (0, 0),
        }
    }

    #[test]
    fn whitespace_only_text_records_empty_and_no_line() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(100, 100));
        let regions = vec![extract(&image, candidate(10.0, 50.0))];
        let recognizer =
            |_: &SubImage<&DynamicImage>| -> Result<String, RecognitionError> { Ok("  \n".into()) };
        let output = recognize_all(regions, &recognizer);
        assert!(output.lines.is_empty());
        assert_eq!(output.regions[0].outcome, RegionOutcome::Empty);
    }

    #[test]
    fn recognized_text_is_trimmed() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(100, 100));
        let regions = vec![extract(&image, candidate(10.0, 50.0))];
        let recognizer = |_: &SubImage<&DynamicImage>| -> Result<String, RecognitionError> {
            Ok("  Aqua \n".into())
        };
        let output = recognize_all(regions, &recognizer);
        assert_eq!(output.lines, vec!["Aqua".to_string()]);
        assert_eq!(
            output.regions[0].outcome,
            RegionOutcome::Recognized("Aqua".into())
        );
    }

    #[test]
    fn failed_extraction_is_recorded_without_invoking_the_recognizer() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(100, 100));
        let regions = vec![extract(&image, candidate(500.0, 600.0))];
        let recognizer = |_: &SubImage<&DynamicImage>| -> Result<String, RecognitionError> {
            panic!("recognizer must not run for failed extractions")
        };
        let output = recognize_all(regions, &recognizer);
        assert!(output.lines.is_empty());
        assert_eq!(output.regions[0].outcome, RegionOutcome::ExtractionFailed);
    }

    #[test]
    fn one_failing_region_does_not_abort_the_rest() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(200, 100));
        let regions = vec![
            extract(&image, candidate(10.0, 50.0)),
            extract(&image, candidate(100.0, 150.0)),
        ];
        let calls = std::cell::Cell::new(0);
        let recognizer = move |_: &SubImage<&DynamicImage>| -> Result<String, RecognitionError> {
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                Err(RecognitionError::new("engine unavailable"))
            } else {
                Ok("Glycerin".into())
            }
        };
        let output = recognize_all(regions, &recognizer);
        assert_eq!(output.lines, vec!["Glycerin".to_string()]);
        assert_eq!(
            output.regions[0].outcome,
            RegionOutcome::RecognitionFailed(RecognitionError::new("engine unavailable"))
        );
    }
}
