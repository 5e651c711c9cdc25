//! Histogram equalization.
//!
//! 8-bit images remap raw byte values. 24-bit images equalize luminance
//! only: each pixel goes to YUV, Y is remapped, U and V are kept, and the
//! result is converted back to RGB.

use log::debug;

use crate::bmp::{Bmp8Image, Bmp24Image};
use crate::pixel::{Pixel, round_u8};

/// Pixel count per intensity.
pub type Histogram = [u64; 256];

/// Remapping from old intensity to equalized intensity.
pub type EqualizationTable = [u8; 256];

/// RGB to YUV (BT.601 analog coefficients).
#[inline]
pub fn rgb_to_yuv(px: Pixel) -> (f32, f32, f32) {
    let (r, g, b) = (f32::from(px.r), f32::from(px.g), f32::from(px.b));
    let y = 0.299 * r + 0.587 * g + 0.114 * b;
    let u = -0.14713 * r - 0.28886 * g + 0.436 * b;
    let v = 0.615 * r - 0.51499 * g - 0.10001 * b;
    (y, u, v)
}

/// YUV back to RGB, each channel rounded and clamped.
#[inline]
pub fn yuv_to_rgb(y: f32, u: f32, v: f32) -> Pixel {
    Pixel::new(
        round_u8(y + 1.13983 * v),
        round_u8(y - 0.39465 * u - 0.58060 * v),
        round_u8(y + 2.03211 * u),
    )
}

/// Luminance rounded to the nearest integer and clamped to `0..=255`.
#[inline]
pub fn luminance(px: Pixel) -> u8 {
    round_u8(rgb_to_yuv(px).0)
}

/// Running sum of `hist`.
pub fn cumulative(hist: &Histogram) -> Histogram {
    let mut cdf = [0u64; 256];
    let mut acc = 0u64;
    for (out, count) in cdf.iter_mut().zip(hist) {
        acc += count;
        *out = acc;
    }
    cdf
}

/// Build the equalization table for `hist`.
///
/// `table[i] = round((cdf[i] - cdf_min) / (n - cdf_min) * 255)` where
/// `cdf_min` is the first non-zero cumulative count and `n` the total.
/// Intensities below `cdf_min` map to 0. When every pixel shares one
/// intensity (or there are none) the table is the identity.
pub fn equalization_table(hist: &Histogram) -> EqualizationTable {
    let cdf = cumulative(hist);
    let n = cdf[255];
    let cdf_min = cdf.iter().copied().find(|&c| c != 0).unwrap_or(0);

    let mut table = [0u8; 256];
    if n == cdf_min {
        for (i, t) in table.iter_mut().enumerate() {
            *t = i as u8;
        }
        return table;
    }

    let den = u128::from(n - cdf_min);
    for (t, &c) in table.iter_mut().zip(&cdf) {
        let num = u128::from(c.saturating_sub(cdf_min));
        // round half up in integers: (num * 255 + den / 2) / den
        let v = (num * 510 + den) / (2 * den);
        *t = v.min(255) as u8;
    }
    table
}

impl Bmp24Image {
    /// Luminance histogram.
    pub fn histogram(&self) -> Histogram {
        let mut hist = [0u64; 256];
        for &px in self.pixels().pixels() {
            hist[usize::from(luminance(px))] += 1;
        }
        hist
    }

    /// Equalize luminance in place, keeping chrominance.
    pub fn equalize(&mut self) {
        let table = equalization_table(&self.histogram());
        for px in self.pixels_mut().pixels_mut() {
            let (y, u, v) = rgb_to_yuv(*px);
            let y_eq = table[usize::from(round_u8(y))];
            *px = yuv_to_rgb(f32::from(y_eq), u, v);
        }
        debug!("equalized {}x{} image", self.width(), self.height());
    }
}

impl Bmp8Image {
    /// Histogram of the first `width * height` bytes.
    pub fn histogram(&self) -> Histogram {
        let mut hist = [0u64; 256];
        for &b in self.pixels() {
            hist[usize::from(b)] += 1;
        }
        hist
    }

    /// Equalize in place, remapping every pixel byte.
    pub fn equalize(&mut self) {
        let table = equalization_table(&self.histogram());
        for b in self.data_mut() {
            *b = table[usize::from(*b)];
        }
        debug!("equalized {}x{} image", self.width(), self.height());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmp::PixelBuffer24;
    use alloc::vec::Vec;

    fn gray_image(values: &[u8], w: u32, h: u32) -> Bmp8Image {
        let file = crate::bmp::gray8_file(w, h, values);
        Bmp8Image::decode(&file, None, enough::Unstoppable).unwrap()
    }

    #[test]
    fn single_intensity_is_identity() {
        let mut hist = [0u64; 256];
        hist[0] = 4;
        let table = equalization_table(&hist);
        for (i, t) in table.iter().enumerate() {
            assert_eq!(usize::from(*t), i);
        }
        hist[0] = 0;
        hist[77] = 9;
        assert_eq!(equalization_table(&hist)[77], 77);
        assert_eq!(equalization_table(&[0; 256])[200], 200);
    }

    #[test]
    fn two_levels_stretch_to_full_range() {
        let mut hist = [0u64; 256];
        hist[100] = 2;
        hist[101] = 2;
        let table = equalization_table(&hist);
        assert_eq!(table[100], 0);
        assert_eq!(table[101], 255);
        assert_eq!(table[255], 255);
    }

    #[test]
    fn table_is_monotonic() {
        let mut hist = [0u64; 256];
        let mut state = 0x1234_5678u32;
        for h in hist.iter_mut() {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            *h = u64::from(state % 7);
        }
        let table = equalization_table(&hist);
        assert!(table.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(table[255], 255);
    }

    #[test]
    fn cumulative_ends_at_total() {
        let mut hist = [0u64; 256];
        hist[3] = 5;
        hist[250] = 7;
        let cdf = cumulative(&hist);
        assert_eq!(cdf[2], 0);
        assert_eq!(cdf[3], 5);
        assert_eq!(cdf[249], 5);
        assert_eq!(cdf[255], 12);
    }

    #[test]
    fn histogram_counts_every_pixel() {
        let px: Vec<Pixel> = (0..35u32)
            .map(|i| Pixel::new((i * 7) as u8, (i * 3) as u8, (255 - i) as u8))
            .collect();
        let img = Bmp24Image::from_buffer(PixelBuffer24::from_pixels(px, 7, 5).unwrap()).unwrap();
        assert_eq!(img.histogram().iter().sum::<u64>(), 35);

        let gray = gray_image(&[9; 12], 4, 3);
        let hist = gray.histogram();
        assert_eq!(hist.iter().sum::<u64>(), 12);
        assert_eq!(hist[9], 12);
    }

    #[test]
    fn yuv_roundtrip_is_close() {
        for px in [
            Pixel::new(0, 0, 0),
            Pixel::new(255, 255, 255),
            Pixel::new(200, 30, 90),
            Pixel::new(12, 240, 128),
        ] {
            let (y, u, v) = rgb_to_yuv(px);
            let back = yuv_to_rgb(y, u, v);
            assert!(back.r.abs_diff(px.r) <= 1, "{px:?} -> {back:?}");
            assert!(back.g.abs_diff(px.g) <= 1, "{px:?} -> {back:?}");
            assert!(back.b.abs_diff(px.b) <= 1, "{px:?} -> {back:?}");
        }
        assert_eq!(luminance(Pixel::new(255, 255, 255)), 255);
        assert_eq!(luminance(Pixel::new(0, 0, 0)), 0);
    }

    #[test]
    fn luminance_rounds_to_nearest() {
        // Y = 0.57 and Y = 0.299
        assert_eq!(luminance(Pixel::new(0, 0, 5)), 1);
        assert_eq!(luminance(Pixel::new(1, 0, 0)), 0);
        // Y = 2.935
        assert_eq!(luminance(Pixel::new(0, 5, 0)), 3);

        let px = alloc::vec![Pixel::new(0, 0, 5), Pixel::new(1, 0, 0)];
        let img = Bmp24Image::from_buffer(PixelBuffer24::from_pixels(px, 2, 1).unwrap()).unwrap();
        let hist = img.histogram();
        assert_eq!(hist[0], 1);
        assert_eq!(hist[1], 1);
    }

    #[test]
    fn gray_equalize_spreads_values() {
        let mut img = gray_image(&[50, 50, 60, 60, 70, 70, 80, 80, 90], 3, 3);
        img.equalize();
        let out = img.pixels();
        assert_eq!(out[0], 0);
        assert_eq!(out[8], 255);
        assert!(out.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn uniform_color_image_is_stable() {
        let px = alloc::vec![Pixel::new(120, 60, 30); 16];
        let mut img = Bmp24Image::from_buffer(PixelBuffer24::from_pixels(px, 4, 4).unwrap()).unwrap();
        let before = img.clone();
        img.equalize();
        for (a, b) in img.pixels().pixels().iter().zip(before.pixels().pixels()) {
            assert!(a.r.abs_diff(b.r) <= 1 && a.g.abs_diff(b.g) <= 1 && a.b.abs_diff(b.b) <= 1);
        }
    }

    #[test]
    fn gray_rgb_equalize_matches_gray_equalize() {
        // Gray pixels have U = V = 0, so luminance-only equalization acts like the 8-bit path.
        let values = [10u8, 10, 20, 20, 30, 30, 40, 40, 200];
        let px: Vec<Pixel> = values.iter().map(|&v| Pixel::new(v, v, v)).collect();
        let mut rgb = Bmp24Image::from_buffer(PixelBuffer24::from_pixels(px, 3, 3).unwrap()).unwrap();
        rgb.equalize();
        let mut gray = gray_image(&values, 3, 3);
        gray.equalize();
        for (c, g) in rgb.pixels().pixels().iter().zip(gray.pixels()) {
            assert!(c.r.abs_diff(*g) <= 1 && c.g.abs_diff(*g) <= 1 && c.b.abs_diff(*g) <= 1);
        }
    }
}
