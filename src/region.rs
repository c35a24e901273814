use image::{imageops, DynamicImage, SubImage};

use crate::TextBox;

/// Integer pixel rect after clamping, guaranteed inside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// One surviving box together with its clamped bounds and a read-only view
/// of the underlying pixels.
pub struct TextRegion<'a> {
    pub source: TextBox,
    pub bounds: PixelRect,
    pub pixels: SubImage<&'a DynamicImage>,
}

pub enum ExtractionResult<'a> {
    Region(TextRegion<'a>),
    OutOfBounds(TextBox),
}

/// Clamps a candidate to the image bounds and slices its pixel region.
///
/// Regions that are degenerate after clamping report `OutOfBounds`; that is
/// a recoverable per-region failure, not fatal to the pipeline. The source
/// image is never mutated.
pub fn extract(image: &DynamicImage, candidate: TextBox) -> ExtractionResult<'_> {
    let start_x = candidate.rect.start_x.max(0.0);
    let start_y = candidate.rect.start_y.max(0.0);
    let end_x = candidate.rect.end_x.min(image.width() as f32);
    let end_y = candidate.rect.end_y.min(image.height() as f32);

    if start_x >= end_x || start_y >= end_y {
        log::debug!(
            "degenerate region after clamping, dropping {:?}",
            candidate.rect
        );
        return ExtractionResult::OutOfBounds(candidate);
    }

    let x = start_x.floor() as u32;
    let y = start_y.floor() as u32;
    let width = (end_x.ceil() as u32).min(image.width()) - x;
    let height = (end_y.ceil() as u32).min(image.height()) - y;

    let pixels = imageops::crop_imm(image, x, y, width, height);
    ExtractionResult::Region(TextRegion {
        source: candidate,
        bounds: PixelRect {
            x,
            y,
            width,
            height,
        },
        pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use image::{GenericImageView, RgbImage};

    fn image_400() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::new(400, 400))
    }

    fn candidate(start_x: f32, start_y: f32, end_x: f32, end_y: f32) -> TextBox {
        TextBox {
            score: 0.9,
            rect: Rect {
                start_x,
                start_y,
                end_x,
                end_y,
            },
            cell: (0, 0),
        }
    }

    #[test]
    fn box_inside_bounds_passes_through_unmodified() {
        let image = image_400();
        match extract(&image, candidate(20.0, 30.0, 60.0, 50.0)) {
            ExtractionResult::Region(region) => {
                assert_eq!(
                    region.bounds,
                    PixelRect {
                        x: 20,
                        y: 30,
                        width: 40,
                        height: 20
                    }
                );
                assert_eq!(region.pixels.dimensions(), (40, 20));
            }
            ExtractionResult::OutOfBounds(_) => panic!("in-bounds box failed to extract"),
        }
    }

    #[test]
    fn box_fully_outside_bounds_fails() {
        let image = image_400();
        assert!(matches!(
            extract(&image, candidate(500.0, 500.0, 600.0, 600.0)),
            ExtractionResult::OutOfBounds(_)
        ));
    }

    #[test]
    fn negative_box_fails() {
        let image = image_400();
        assert!(matches!(
            extract(&image, candidate(-50.0, -50.0, -10.0, -10.0)),
            ExtractionResult::OutOfBounds(_)
        ));
    }

    #[test]
    fn straddling_box_is_clamped_to_the_boundary() {
        let image = image_400();
        match extract(&image, candidate(-10.0, -10.0, 50.0, 50.0)) {
            ExtractionResult::Region(region) => {
                assert_eq!(
                    region.bounds,
                    PixelRect {
                        x: 0,
                        y: 0,
                        width: 50,
                        height: 50
                    }
                );
            }
            ExtractionResult::OutOfBounds(_) => panic!("straddling box failed to extract"),
        }
    }

    #[test]
    fn straddling_far_edge_never_indexes_outside_the_image() {
        let image = image_400();
        match extract(&image, candidate(380.0, 380.0, 450.0, 450.0)) {
            ExtractionResult::Region(region) => {
                assert_eq!(region.bounds.x + region.bounds.width, 400);
                assert_eq!(region.bounds.y + region.bounds.height, 400);
            }
            ExtractionResult::OutOfBounds(_) => panic!("straddling box failed to extract"),
        }
    }
}
