//! The entry points external collaborators call: compare two captures,
//! classify one selection.

use crate::annotations::DetectionSet;
use crate::constants::MATCH_RADIUS_PX;
use crate::enricher::{ClassificationEnricher, ClassificationResult};
use crate::matcher;
use crate::object_detection::tiled_detector::TiledDetector;
use crate::resolver::ImageResolver;
use std::sync::Arc;
use tracing::info;

/// Wires the resolver, tiled detector, temporal matcher, and enricher
/// into the two call paths the UI layer uses.
pub struct Pipeline {
    resolver: Arc<ImageResolver>,
    detector: TiledDetector,
    enricher: ClassificationEnricher,
    match_radius: f32,
}

impl Pipeline {
    pub fn new(
        resolver: Arc<ImageResolver>,
        detector: TiledDetector,
        enricher: ClassificationEnricher,
    ) -> Self {
        Self {
            resolver,
            detector,
            enricher,
            match_radius: MATCH_RADIUS_PX,
        }
    }

    /// Overrides the temporal matching radius (pixels).
    pub fn with_match_radius(mut self, radius: f32) -> Self {
        self.match_radius = radius;
        self
    }

    /// Detects on both captures (cache-checked, independently degraded)
    /// and diffs them. The first element annotates the past capture, the
    /// second the current one.
    pub fn compare_captures(&self, past: &str, current: &str) -> (DetectionSet, DetectionSet) {
        let past_set = self.detector.detect(past);
        let current_set = self.detector.detect(current);
        info!(
            past = past_set.len(),
            current = current_set.len(),
            "comparing captures"
        );
        matcher::compare(&past_set, &current_set, self.match_radius)
    }

    /// Re-classifies one detection, selected by its `sequence_index`, from
    /// its source image. Degrades to a sentinel result when the image
    /// cannot be resolved.
    pub fn classify_selection(
        &self,
        reference: &str,
        set: &DetectionSet,
        sequence_index: usize,
    ) -> ClassificationResult {
        let Some(image) = self.resolver.resolve(reference) else {
            return ClassificationResult::error();
        };
        self.enricher.classify_selection(&image, set, sequence_index)
    }

    /// Forces re-detection of one reference on its next use by dropping
    /// both its cached pixels and its cached detection result.
    pub fn invalidate(&self, reference: &str) {
        self.resolver.invalidate(reference);
        self.detector.invalidate(reference);
    }
}
