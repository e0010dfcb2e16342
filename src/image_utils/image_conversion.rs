use image::RgbImage;
use ndarray::{Array, Array4};

/// Converts an RGB image into a normalized NCHW float tensor, the input
/// layout of the ONNX detection and classification models.
///
/// The dimensions encode (image, channel, row, column); values are scaled
/// from `0..=255` to `0.0..=1.0`.
pub fn convert_rgb_image_to_array4(rgb_image: &RgbImage) -> Array4<f32> {
    let mut image_array = Array::zeros((
        1,
        3,
        rgb_image.height() as usize,
        rgb_image.width() as usize,
    ));
    for (x, y, pixel) in rgb_image.enumerate_pixels() {
        let x = x as usize;
        let y = y as usize;
        let [r, g, b] = pixel.0;
        image_array[[0, 0, y, x]] = f32::from(r) / 255.0;
        image_array[[0, 1, y, x]] = f32::from(g) / 255.0;
        image_array[[0, 2, y, x]] = f32::from(b) / 255.0;
    }
    image_array
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn conversion_preserves_layout_and_scale() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(2, 1, Rgb([0, 0, 255]));

        let arr = convert_rgb_image_to_array4(&img);
        assert_eq!(arr.shape(), &[1, 3, 2, 3]);
        // (channel, row, column) indexing.
        assert_eq!(arr[[0, 0, 0, 0]], 1.0);
        assert_eq!(arr[[0, 1, 0, 1]], 1.0);
        assert_eq!(arr[[0, 2, 1, 2]], 1.0);
        assert_eq!(arr[[0, 0, 1, 0]], 0.0);
    }
}
