//! Temporal correspondence between two captures of the same site.

use crate::annotations::{DetectionSet, Status};
use crate::constants::MATCH_RADIUS_PX;

/// Diffs two detection sets of the same site taken at different times,
/// marking each detection `Vanished` (in `past` only), `New` (in `current`
/// only), or leaving it `Static`.
///
/// A detection counts as matched when any detection in the other set has a
/// box center within `radius` pixels. This is an existence check, not a
/// bipartite assignment: several detections may satisfy the same partner,
/// so a tight cluster of aircraft can under-report NEW/VANISHED. That
/// approximation is intentional and acceptable at apron-scale spacing.
///
/// Pure with respect to its inputs; the annotated sets are copies.
pub fn compare(past: &DetectionSet, current: &DetectionSet, radius: f32) -> (DetectionSet, DetectionSet) {
    let mut annotated_past = past.clone();
    let mut annotated_current = current.clone();

    for detection in &mut annotated_past.detections {
        let matched = current
            .detections
            .iter()
            .any(|other| detection.bbox.center_distance(&other.bbox) < radius);
        if !matched {
            detection.status = Status::Vanished;
        }
    }
    for detection in &mut annotated_current.detections {
        let matched = past
            .detections
            .iter()
            .any(|other| detection.bbox.center_distance(&other.bbox) < radius);
        if !matched {
            detection.status = Status::New;
        }
    }
    (annotated_past, annotated_current)
}

/// [`compare`] with the standard 60 px radius.
pub fn compare_default(past: &DetectionSet, current: &DetectionSet) -> (DetectionSet, DetectionSet) {
    compare(past, current, MATCH_RADIUS_PX)
}
