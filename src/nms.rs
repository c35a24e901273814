use std::cmp::Reverse;

use float_ord::FloatOrd;
use tracing::instrument;

use crate::TextBox;

/// Greedy non-maximum suppression over decoded candidates.
///
/// Candidates below `score_threshold` are dropped up front, the rest are
/// picked best-first, and anything overlapping a kept box by more than
/// `overlap_threshold` IoU is discarded. The sort is stable, so equal
/// confidences keep their decode order.
#[instrument(level = "debug", skip(candidates))]
pub fn suppress(
    candidates: Vec<TextBox>,
    score_threshold: f32,
    overlap_threshold: f32,
) -> Vec<TextBox> {
    let mut remaining: Vec<TextBox> = candidates
        .into_iter()
        .filter(|candidate| candidate.score >= score_threshold)
        .collect();
    remaining.sort_by_key(|candidate| Reverse(FloatOrd(candidate.score)));

    let mut survivors = Vec::new();
    while !remaining.is_empty() {
        let best = remaining.remove(0);
        remaining.retain(|other| best.rect.iou(&other.rect) <= overlap_threshold);
        log::trace!(
            "kept box from cell {:?} with score {}",
            best.cell,
            best.score
        );
        survivors.push(best);
    }
    survivors
}
