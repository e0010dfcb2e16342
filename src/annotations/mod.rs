//! Typed detection records shared between the detector, matcher, and
//! external renderers.

pub mod bounding_box;
pub mod detection;

pub use bounding_box::BoundingBox;
pub use detection::{Detection, DetectionSet, Status};
