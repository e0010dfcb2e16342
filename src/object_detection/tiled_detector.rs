use crate::annotations::{Detection, DetectionSet, Status};
use crate::cache::BoundedCache;
use crate::constants::{
    AUTOCONTRAST_CUTOFF, CACHE_CAPACITY, CONFIDENCE_THRESHOLD, EDGE_FRACTION, IOU_THRESHOLD,
    TILE_SIZE, TILE_STRIDE,
};
use crate::error::Result;
use crate::image_utils::contrast::autocontrast;
use crate::image_utils::image_conversion::convert_rgb_image_to_array4;
use crate::image_utils::padding::pad_right_bottom_rgb8;
use crate::image_utils::tiling::{Tile, TileGrid};
use crate::object_detection::models::{Candidate, ObjectDetectionModel};
use crate::object_detection::nms::non_maximum_suppression;
use crate::resolver::{ImageResolver, normalize_reference};
use image::RgbImage;
use image::imageops;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Tuning knobs of the tiled pipeline. `tile_size` should match the
/// detection model's input size.
#[derive(Clone, Copy, Debug)]
pub struct DetectorConfig {
    pub tile_size: u32,
    pub stride: u32,
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
    /// Tile-local boxes at least this fraction of the tile edge are
    /// assumed truncated by the tile boundary and dropped.
    pub edge_fraction: f32,
    pub autocontrast_cutoff: u32,
    pub cache_capacity: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            stride: TILE_STRIDE,
            confidence_threshold: CONFIDENCE_THRESHOLD,
            iou_threshold: IOU_THRESHOLD,
            edge_fraction: EDGE_FRACTION,
            autocontrast_cutoff: AUTOCONTRAST_CUTOFF,
            cache_capacity: CACHE_CAPACITY,
        }
    }
}

/// Detects small objects at full resolution by tiling the image, running
/// the detector per tile, reprojecting tile-local boxes, and merging
/// overlapping reports with NMS.
///
/// Per-reference results are memoized; `detect` on a warm cache returns an
/// identical set without re-invoking the model. Every failure mode —
/// unresolvable image, absent model, inference error — degrades to the
/// empty set so a comparison flow never aborts over one bad capture.
pub struct TiledDetector {
    model: Option<Box<dyn ObjectDetectionModel + Send + Sync>>,
    resolver: Arc<ImageResolver>,
    config: DetectorConfig,
    results: BoundedCache<String, DetectionSet>,
}

impl TiledDetector {
    pub fn new(
        model: Option<Box<dyn ObjectDetectionModel + Send + Sync>>,
        resolver: Arc<ImageResolver>,
        config: DetectorConfig,
    ) -> Self {
        let results = BoundedCache::new(config.cache_capacity);
        Self {
            model,
            resolver,
            config,
            results,
        }
    }

    /// Runs cached tiled detection for one image reference. The returned
    /// set is the caller's copy; mutating it does not affect the cache.
    pub fn detect(&self, reference: &str) -> DetectionSet {
        let key = normalize_reference(reference);
        // The cache lock is held across the computation: concurrent
        // requests wait instead of redundantly re-running inference.
        self.results.get_or_compute(&key, || self.detect_uncached(&key))
    }

    /// Drops the cached result for one reference; the next `detect`
    /// re-runs inference.
    pub fn invalidate(&self, reference: &str) {
        self.results.invalidate(&normalize_reference(reference));
    }

    fn detect_uncached(&self, key: &str) -> DetectionSet {
        let Some(image) = self.resolver.resolve(key) else {
            return DetectionSet::empty();
        };
        let Some(model) = self.model.as_deref() else {
            debug!(reference = %key, "no detection model loaded, returning empty set");
            return DetectionSet::empty();
        };
        match self.run_tiled(model, &image) {
            Ok(set) => {
                info!(reference = %key, detections = set.len(), "tiled detection complete");
                set
            }
            Err(e) => {
                warn!(reference = %key, error = %e, "tiled detection failed");
                DetectionSet::empty()
            }
        }
    }

    fn run_tiled(
        &self,
        model: &(dyn ObjectDetectionModel + Send + Sync),
        image: &RgbImage,
    ) -> Result<DetectionSet> {
        let (image_width, image_height) = image.dimensions();
        let cfg = &self.config;
        let stretched = autocontrast(image, cfg.autocontrast_cutoff);
        let grid = TileGrid::new(image_width, image_height, cfg.tile_size, cfg.stride);
        debug!(tiles = grid.len(), image_width, image_height, "tiling image");

        let mut merged: Vec<Candidate> = Vec::new();
        for tile in grid.iter() {
            let tile_image = crop_tile(&stretched, tile);
            let tile_array = convert_rgb_image_to_array4(&tile_image);
            let candidates = model.run_inference(tile_array.view(), cfg.confidence_threshold)?;
            let edge_limit = cfg.edge_fraction * tile.size as f32;
            for candidate in candidates {
                // A box spanning (almost) the whole tile is a truncation
                // artifact: two adjacent tiles each see part of it.
                if candidate.bbox.width() >= edge_limit || candidate.bbox.height() >= edge_limit {
                    continue;
                }
                merged.push(candidate.translated(tile.x as f32, tile.y as f32));
            }
        }

        let kept = non_maximum_suppression(merged, cfg.iou_threshold);
        let detections = kept
            .into_iter()
            .enumerate()
            .map(|(rank, candidate)| Detection {
                bbox: candidate.bbox,
                label: candidate.label,
                confidence: candidate.confidence,
                sequence_index: rank,
                status: Status::Static,
            })
            .collect();
        Ok(DetectionSet {
            detections,
            image_width,
            image_height,
        })
    }
}

/// Extracts one tile's pixels, padding right/bottom with black when the
/// image is smaller than the tile along an axis.
fn crop_tile(image: &RgbImage, tile: &Tile) -> RgbImage {
    let cropped = imageops::crop_imm(image, tile.x, tile.y, tile.size, tile.size).to_image();
    if cropped.width() < tile.size || cropped.height() < tile.size {
        return pad_right_bottom_rgb8(&cropped, tile.size, tile.size);
    }
    cropped
}
