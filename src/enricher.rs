//! On-demand re-classification of a single selected detection.

use crate::annotations::{Detection, DetectionSet};
use crate::constants::{CLASSIFY_UPSCALE, TOP_K_LABELS};
use crate::image_utils::image_conversion::convert_rgb_image_to_array4;
use crate::object_detection::models::ClassificationModel;
use image::RgbImage;
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One ranked candidate label with its confidence as a percentage string.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RankedLabel {
    pub label: String,
    pub confidence: String,
}

/// Output of a single classification call. Never cached; the enricher is
/// invoked per UI selection.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub top1_label: String,
    pub top1_confidence: String,
    /// Up to three runner-up candidates, best first.
    pub top5: Vec<RankedLabel>,
}

impl ClassificationResult {
    /// Sentinel for "no classifier model loaded".
    pub fn unavailable() -> Self {
        Self {
            top1_label: "-".to_string(),
            top1_confidence: "-".to_string(),
            top5: Vec::new(),
        }
    }

    /// Sentinel for a malformed crop or a failed inference call.
    pub fn error() -> Self {
        Self {
            top1_label: "Error".to_string(),
            top1_confidence: "-".to_string(),
            top5: Vec::new(),
        }
    }
}

/// Runs the secondary classifier over one bounding-box crop.
///
/// The model is an injected optional dependency; without one, every call
/// returns the `unavailable` sentinel. No call ever fails loudly — the
/// caller always gets a renderable result.
pub struct ClassificationEnricher {
    model: Option<Box<dyn ClassificationModel + Send + Sync>>,
}

impl ClassificationEnricher {
    pub fn new(model: Option<Box<dyn ClassificationModel + Send + Sync>>) -> Self {
        Self { model }
    }

    /// Classifies a crop, upsampling it first — small aircraft crops
    /// classify poorly at native resolution.
    pub fn classify(&self, crop: &RgbImage) -> ClassificationResult {
        let Some(model) = self.model.as_deref() else {
            return ClassificationResult::unavailable();
        };
        let (width, height) = crop.dimensions();
        if width == 0 || height == 0 {
            return ClassificationResult::error();
        }

        let upsampled = imageops::resize(
            crop,
            width * CLASSIFY_UPSCALE,
            height * CLASSIFY_UPSCALE,
            FilterType::Lanczos3,
        );
        let input_size = model.input_size();
        let fitted = imageops::resize(&upsampled, input_size, input_size, FilterType::Triangle);
        let input = convert_rgb_image_to_array4(&fitted);

        match model.run_inference(input.view()) {
            Ok(ranked) => Self::format_ranked(&ranked),
            Err(e) => {
                warn!(error = %e, "classification failed");
                ClassificationResult::error()
            }
        }
    }

    /// Classifies the detection with the given UI selection key, cropping
    /// it out of the source image.
    pub fn classify_selection(
        &self,
        image: &RgbImage,
        set: &DetectionSet,
        sequence_index: usize,
    ) -> ClassificationResult {
        let Some(detection) = set.by_sequence_index(sequence_index) else {
            debug!(sequence_index, "selection index not present in detection set");
            return ClassificationResult::error();
        };
        self.classify(&crop_detection(image, detection))
    }

    fn format_ranked(ranked: &[(String, f32)]) -> ClassificationResult {
        let Some((top1_label, top1_prob)) = ranked.first() else {
            return ClassificationResult::error();
        };
        let top5 = ranked
            .iter()
            .take(TOP_K_LABELS)
            .map(|(label, prob)| RankedLabel {
                label: label.clone(),
                confidence: format_percent(*prob),
            })
            .collect();
        ClassificationResult {
            top1_label: top1_label.clone(),
            top1_confidence: format_percent(*top1_prob),
            top5,
        }
    }
}

fn format_percent(prob: f32) -> String {
    format!("{:.1}%", prob * 100.0)
}

/// Crops a detection's box out of its source image, clamped to the image
/// bounds. A box fully outside the image yields a zero-area crop, which
/// `classify` reports as the error sentinel.
fn crop_detection(image: &RgbImage, detection: &Detection) -> RgbImage {
    let bbox = detection
        .bbox
        .clamped(image.width() as f32, image.height() as f32);
    let x = bbox.left().floor() as u32;
    let y = bbox.top().floor() as u32;
    let w = (bbox.right().ceil() - bbox.left().floor()).max(0.0) as u32;
    let h = (bbox.bottom().ceil() - bbox.top().floor()).max(0.0) as u32;
    imageops::crop_imm(image, x, y, w, h).to_image()
}
