use crate::object_detection::models::Candidate;
use std::cmp::Ordering;

/// Greedy non-maximum suppression over the merged set of tile detections.
///
/// Adjacent tiles overlap by design, so one aircraft near a tile boundary
/// is usually reported twice. Candidates are sorted by descending
/// confidence; each kept box suppresses every remaining box whose IoU with
/// it exceeds `iou_threshold`. Suppression is class-agnostic: overlapping
/// boxes with different labels still describe one airframe.
///
/// The sort is stable, so equal-confidence candidates keep their tile
/// traversal order and the result is deterministic.
pub fn non_maximum_suppression(
    mut candidates: Vec<Candidate>,
    iou_threshold: f32,
) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });
    let mut suppressed: Vec<bool> = vec![false; candidates.len()];
    for current_index in 0..candidates.len() {
        if suppressed[current_index] {
            continue;
        }
        for other_index in current_index + 1..candidates.len() {
            if suppressed[other_index] {
                continue;
            }
            let iou = candidates[current_index]
                .bbox
                .intersection_over_union(&candidates[other_index].bbox);
            if iou > iou_threshold {
                suppressed[other_index] = true;
            }
        }
    }
    let mut drop_iter = suppressed.iter();
    candidates.retain(|_| !drop_iter.next().unwrap_or(&false));
    candidates
}
