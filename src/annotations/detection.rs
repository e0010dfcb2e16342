use crate::annotations::bounding_box::BoundingBox;
use serde::{Deserialize, Serialize};

/// Temporal status of a detection relative to the other capture of the
/// same site.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Present in both captures (or not yet compared).
    #[default]
    Static,
    /// Present in the current capture only.
    New,
    /// Present in the past capture only.
    Vanished,
}

/// One detected object in global image coordinates.
///
/// A detection is a bounding box combined with the model's label for it and
/// a confidence score encoding the model's belief that the detection is
/// true. `sequence_index` is the detection's rank in its set after NMS; it
/// is unique within the set and used by the UI as a selection key, but a
/// fresh detection run may assign different indices.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Detection {
    pub bbox: BoundingBox,
    pub label: String,
    pub confidence: f32,
    pub sequence_index: usize,
    pub status: Status,
}

/// Everything found in one image at one point in time, plus the source
/// image dimensions renderers need for coordinate-correct overlays.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct DetectionSet {
    pub detections: Vec<Detection>,
    pub image_width: u32,
    pub image_height: u32,
}

impl DetectionSet {
    /// The degraded result: no detections, zero dimensions. Returned when
    /// the image cannot be resolved or no detector model is loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks a detection up by its UI selection key.
    pub fn by_sequence_index(&self, sequence_index: usize) -> Option<&Detection> {
        self.detections
            .iter()
            .find(|d| d.sequence_index == sequence_index)
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_screaming() {
        let statuses = vec![Status::Static, Status::New, Status::Vanished];
        let json = serde_json::to_string(&statuses).unwrap();
        assert_eq!(json, r#"["STATIC","NEW","VANISHED"]"#);
    }

    #[test]
    fn lookup_by_sequence_index() {
        let set = DetectionSet {
            detections: vec![Detection {
                bbox: BoundingBox::new(0.0, 0.0, 10.0, 10.0).unwrap(),
                label: "fighter".to_string(),
                confidence: 0.9,
                sequence_index: 3,
                status: Status::Static,
            }],
            image_width: 100,
            image_height: 100,
        };
        assert!(set.by_sequence_index(3).is_some());
        assert!(set.by_sequence_index(0).is_none());
    }
}
