use image::{Rgb, RgbImage};

/// Per-channel automatic contrast stretch with a percentage clipped from
/// each histogram tail.
///
/// Satellite captures of the monitored sites are low-contrast; without this
/// stretch, small aircraft are effectively invisible to the detector. The
/// cutoff ignores outlier pixels (sensor noise, specular glints) so a
/// handful of extreme values does not flatten the remap.
pub fn autocontrast(img: &RgbImage, cutoff_percent: u32) -> RgbImage {
    let pixel_count = u64::from(img.width()) * u64::from(img.height());
    if pixel_count == 0 {
        return img.clone();
    }

    let mut histograms = [[0u64; 256]; 3];
    for pixel in img.pixels() {
        for (channel, &value) in pixel.0.iter().enumerate() {
            histograms[channel][value as usize] += 1;
        }
    }
    let luts: Vec<[u8; 256]> = histograms
        .iter()
        .map(|h| channel_lut(h, pixel_count, cutoff_percent))
        .collect();

    let mut out = RgbImage::new(img.width(), img.height());
    for (x, y, pixel) in img.enumerate_pixels() {
        let [r, g, b] = pixel.0;
        out.put_pixel(
            x,
            y,
            Rgb([
                luts[0][r as usize],
                luts[1][g as usize],
                luts[2][b as usize],
            ]),
        );
    }
    out
}

/// Builds the remap table for one channel: clip `cutoff_percent` of the
/// mass from each end of the histogram, then stretch what remains over the
/// full 0..=255 range.
fn channel_lut(histogram: &[u64; 256], pixel_count: u64, cutoff_percent: u32) -> [u8; 256] {
    let mut trimmed = *histogram;
    let cut = pixel_count * u64::from(cutoff_percent) / 100;

    let mut remaining = cut;
    for bin in trimmed.iter_mut() {
        if *bin >= remaining {
            *bin -= remaining;
            break;
        }
        remaining -= *bin;
        *bin = 0;
    }
    let mut remaining = cut;
    for bin in trimmed.iter_mut().rev() {
        if *bin >= remaining {
            *bin -= remaining;
            break;
        }
        remaining -= *bin;
        *bin = 0;
    }

    let lo = trimmed.iter().position(|&c| c > 0);
    let hi = trimmed.iter().rposition(|&c| c > 0);
    let identity = || {
        let mut lut = [0u8; 256];
        for (i, slot) in lut.iter_mut().enumerate() {
            *slot = i as u8;
        }
        lut
    };
    let (Some(lo), Some(hi)) = (lo, hi) else {
        return identity();
    };
    if hi <= lo {
        return identity();
    }

    let scale = 255.0 / (hi - lo) as f32;
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        let stretched = (i as f32 - lo as f32) * scale;
        *slot = stretched.round().clamp(0.0, 255.0) as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stretches_narrow_range_to_full() {
        // 100 pixels between 100 and 150, no cutoff.
        let mut img = RgbImage::new(10, 10);
        for (i, pixel) in img.pixels_mut().enumerate() {
            let v = 100 + (i as u8 % 51);
            *pixel = Rgb([v, v, v]);
        }
        let out = autocontrast(&img, 0);
        let values: Vec<u8> = out.pixels().map(|p| p.0[0]).collect();
        assert_eq!(*values.iter().min().unwrap(), 0);
        assert_eq!(*values.iter().max().unwrap(), 255);
    }

    #[test]
    fn uniform_image_is_unchanged() {
        let img = RgbImage::from_pixel(8, 8, Rgb([42, 42, 42]));
        let out = autocontrast(&img, 1);
        assert_eq!(out, img);
    }

    #[test]
    fn cutoff_ignores_outlier_pixels() {
        // 255 mid-gray pixels plus one black outlier. With a 1% cutoff the
        // outlier is clipped and cannot anchor the low end of the stretch.
        let mut img = RgbImage::from_pixel(16, 16, Rgb([120, 120, 120]));
        img.put_pixel(0, 0, Rgb([0, 0, 0]));
        let mut with_cut = autocontrast(&img, 1);
        // All surviving mass sits in one bin, so the remap is identity.
        assert_eq!(with_cut.get_pixel(8, 8), &Rgb([120, 120, 120]));
        // Without the cutoff the gray mass is stretched toward white.
        with_cut = autocontrast(&img, 0);
        assert_eq!(with_cut.get_pixel(8, 8), &Rgb([255, 255, 255]));
    }
}
