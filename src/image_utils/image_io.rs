use crate::error::Result;
use image::RgbImage;
use std::path::Path;

/// Reads an image from disk, forcing 3-channel RGB. Grayscale and RGBA
/// source imagery both normalize to the representation the models expect.
pub fn read_image_as_rgb8(filepath: &Path) -> Result<RgbImage> {
    Ok(image::open(filepath)?.into_rgb8())
}

/// Decodes an in-memory byte buffer (an HTTP response body) as RGB.
pub fn decode_bytes_as_rgb8(bytes: &[u8]) -> Result<RgbImage> {
    Ok(image::load_from_memory(bytes)?.into_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::io::Cursor;

    #[test]
    fn decode_round_trips_through_png_bytes() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 1, Rgb([0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_bytes_as_rgb8(&bytes).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_bytes_as_rgb8(&[0, 1, 2, 3]).is_err());
    }

    #[test]
    fn read_missing_file_is_an_error() {
        assert!(read_image_as_rgb8(Path::new("/nonexistent/image.png")).is_err());
    }
}
