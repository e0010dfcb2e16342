//! Error types for apron-watch.

/// Result type alias for apron-watch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
///
/// These errors circulate inside the crate only. Every per-request entry
/// point (`detect`, `compare`, `classify`) converts them into a degraded
/// value at the boundary, so collaborators never see an `Err`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// HTTP fetch of a remote image reference failed.
    #[error("image fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Remote server answered with a non-success status.
    #[error("image fetch for '{url}' returned status {status}")]
    FetchStatus {
        /// The normalized reference that was fetched.
        url: String,
        /// HTTP status code of the response.
        status: u16,
    },

    /// The ONNX runtime reported a failure during session setup or inference.
    #[error("inference failed: {0}")]
    Inference(#[from] ort::Error),

    /// A bounding box with inverted corners was constructed.
    #[error(
        "invalid bounding box: left {left} > right {right} or top {top} > bottom {bottom}"
    )]
    InvalidBox {
        /// Left edge in pixels.
        left: f32,
        /// Top edge in pixels.
        top: f32,
        /// Right edge in pixels.
        right: f32,
        /// Bottom edge in pixels.
        bottom: f32,
    },
}
