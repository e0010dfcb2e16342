//! Image decoding, preprocessing, and tiling helpers.

pub mod contrast;
pub mod image_conversion;
pub mod image_io;
pub mod padding;
pub mod tiling;
