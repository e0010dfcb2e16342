//! apron-watch — tiled aircraft detection over large satellite imagery.
//!
//! The crate ingests full-resolution captures of fixed installations,
//! detects aircraft through overlapping-tile inference with coordinate
//! reprojection and NMS, correlates two time-separated captures into
//! NEW / VANISHED / STATIC statuses, and re-classifies single selected
//! crops with a secondary model. UI, persistence, and report layers are
//! external collaborators: they hand in image references and receive
//! typed detection sets back. No operation on the request path returns an
//! error — failures degrade to empty or sentinel values so there is
//! always something to render.

pub mod annotations;
pub mod cache;
pub mod constants;
pub mod enricher;
pub mod error;
pub mod image_utils;
pub mod matcher;
pub mod object_detection;
pub mod pipeline;
pub mod resolver;

pub use annotations::{BoundingBox, Detection, DetectionSet, Status};
pub use enricher::{ClassificationEnricher, ClassificationResult, RankedLabel};
pub use error::{Error, Result};
pub use object_detection::{DetectorConfig, TiledDetector, YoloClassifier, YoloDetector};
pub use pipeline::Pipeline;
pub use resolver::ImageResolver;
