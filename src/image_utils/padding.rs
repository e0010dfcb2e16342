use image::RgbImage;

/// Pads an rgb8 image with black pixels on the right and bottom.
///
/// Used when a source image is smaller than one detection tile along an
/// axis: the detector still receives a full-size input, and padded pixels
/// sit outside any real detection.
pub fn pad_right_bottom_rgb8(original: &RgbImage, new_width: u32, new_height: u32) -> RgbImage {
    let mut padded = RgbImage::new(new_width, new_height);
    for (x, y, pixel) in original.enumerate_pixels() {
        if x < new_width && y < new_height {
            padded.put_pixel(x, y, *pixel);
        }
    }
    padded
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn pads_with_black() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(1, 1, Rgb([9, 9, 9]));
        let padded = pad_right_bottom_rgb8(&img, 4, 3);
        assert_eq!(padded.dimensions(), (4, 3));
        assert_eq!(padded.get_pixel(1, 1), &Rgb([9, 9, 9]));
        assert_eq!(padded.get_pixel(3, 2), &Rgb([0, 0, 0]));
    }
}
