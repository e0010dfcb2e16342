//! Fixed parameters of the detection pipeline.
//!
//! These mirror the values the detection models were tuned against. They are
//! defaults; the `DetectorConfig` struct lets a caller override them.

/// Edge length of a square detection tile, in pixels. Matches the detector
/// model's input size.
pub const TILE_SIZE: u32 = 1280;

/// Distance between tile origins, in pixels (~22% overlap at 1280).
pub const TILE_STRIDE: u32 = 1000;

/// Minimum confidence for a detection to survive the per-tile pass.
pub const CONFIDENCE_THRESHOLD: f32 = 0.35;

/// IoU above which two merged detections are considered duplicates.
pub const IOU_THRESHOLD: f32 = 0.45;

/// A tile-local box at least this fraction of the tile edge is assumed to be
/// truncated by the tile boundary and is discarded.
pub const EDGE_FRACTION: f32 = 0.98;

/// Percentage of each histogram tail clipped by the contrast stretch.
pub const AUTOCONTRAST_CUTOFF: u32 = 1;

/// Maximum centroid distance, in pixels, for two detections in different
/// captures to count as the same object.
pub const MATCH_RADIUS_PX: f32 = 60.0;

/// Capacity of the image and result LRU caches.
pub const CACHE_CAPACITY: usize = 32;

/// Timeout applied to remote image fetches, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Upscale factor applied to crops before classification. Small crops
/// classify poorly at native resolution.
pub const CLASSIFY_UPSCALE: u32 = 2;

/// Number of ranked candidate labels returned alongside the top-1.
pub const TOP_K_LABELS: usize = 3;
