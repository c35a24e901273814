use crate::Rect;

/// Target dimensions for the detector input plus the factors that map
/// detector-space boxes back onto the original image.
#[derive(Debug, Clone, Copy)]
pub struct ResizePlan {
    pub target_width: u32,
    pub target_height: u32,
    pub factor_x: f32,
    pub factor_y: f32,
}

impl ResizePlan {
    /// Maps a detector-space rect back to original-image coordinates.
    pub fn restore(&self, rect: Rect) -> Rect {
        Rect {
            start_x: rect.start_x * self.factor_x,
            start_y: rect.start_y * self.factor_y,
            end_x: rect.end_x * self.factor_x,
            end_y: rect.end_y * self.factor_y,
        }
    }
}

/// Plans the resize of an image for the detector: the long side is capped at
/// `max_side_len` and both sides floored to a multiple of 32, which the
/// network requires of its input.
pub fn plan_resize(width: u32, height: u32, max_side_len: u32) -> ResizePlan {
    let aspect_ratio = width as f32 / height as f32;
    let (mut target_width, mut target_height) = if aspect_ratio >= 1.0 {
        let target = width.min(max_side_len);
        (target, (target as f32 / aspect_ratio) as u32)
    } else {
        let target = height.min(max_side_len);
        ((target as f32 * aspect_ratio) as u32, target)
    };
    if target_width % 32 != 0 {
        let floored = (target_width / 32 * 32).max(32);
        log::debug!("target width {target_width} wasn't a multiple of 32, flooring to {floored}");
        target_width = floored;
    }
    if target_height % 32 != 0 {
        let floored = (target_height / 32 * 32).max(32);
        log::debug!("target height {target_height} wasn't a multiple of 32, flooring to {floored}");
        target_height = floored;
    }
    let factor_x = width as f32 / target_width as f32;
    let factor_y = height as f32 / target_height as f32;
    log::debug!(
        "detector input will be {target_width}x{target_height}, restore factors ({factor_x}, {factor_y})"
    );
    ResizePlan {
        target_width,
        target_height,
        factor_x,
        factor_y,
    }
}
