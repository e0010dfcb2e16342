//! Model abstractions, ONNX implementations, and the tiled detection
//! pipeline.

pub mod models;
pub mod nms;
pub mod tiled_detector;
pub mod yolo_classifier;
pub mod yolo_detector;

pub use models::{Candidate, ClassificationModel, ObjectDetectionModel, read_classes_txt_file};
pub use tiled_detector::{DetectorConfig, TiledDetector};
pub use yolo_classifier::YoloClassifier;
pub use yolo_detector::YoloDetector;
