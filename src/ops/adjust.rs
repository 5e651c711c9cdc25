//! Per-pixel adjustments. Every operation touches every pixel (every byte
//! for 8-bit images) and cannot fail.

use crate::bmp::{Bmp8Image, Bmp24Image};
use crate::pixel::{Pixel, clamp_u8};

#[inline]
fn shift(c: u8, delta: i32) -> u8 {
    clamp_u8(i32::from(c).saturating_add(delta))
}

/// Invert every channel: `c -> 255 - c`.
pub fn negate_pixels(pixels: &mut [Pixel]) {
    for px in pixels {
        *px = Pixel::new(255 - px.r, 255 - px.g, 255 - px.b);
    }
}

/// Set all three channels to the truncated mean `(r + g + b) / 3`.
pub fn grayscale_pixels(pixels: &mut [Pixel]) {
    for px in pixels {
        let mean = ((u16::from(px.r) + u16::from(px.g) + u16::from(px.b)) / 3) as u8;
        *px = Pixel::new(mean, mean, mean);
    }
}

/// Add `delta` to every channel, clamped to `0..=255`.
pub fn brighten_pixels(pixels: &mut [Pixel], delta: i32) {
    for px in pixels {
        *px = Pixel::new(shift(px.r, delta), shift(px.g, delta), shift(px.b, delta));
    }
}

pub fn negate_bytes(bytes: &mut [u8]) {
    for b in bytes {
        *b = 255 - *b;
    }
}

pub fn brighten_bytes(bytes: &mut [u8], delta: i32) {
    for b in bytes {
        *b = shift(*b, delta);
    }
}

/// `b -> 255` when `b >= level`, else `0`.
pub fn threshold_bytes(bytes: &mut [u8], level: u8) {
    for b in bytes {
        *b = if *b >= level { 255 } else { 0 };
    }
}

impl Bmp24Image {
    pub fn negative(&mut self) {
        negate_pixels(self.pixels_mut().pixels_mut());
    }

    pub fn grayscale(&mut self) {
        grayscale_pixels(self.pixels_mut().pixels_mut());
    }

    /// Shift every channel by `delta`, saturating at both 0 and 255.
    pub fn brightness(&mut self, delta: i32) {
        brighten_pixels(self.pixels_mut().pixels_mut(), delta);
    }
}

impl Bmp8Image {
    pub fn negative(&mut self) {
        negate_bytes(self.data_mut());
    }

    /// Shift every byte by `delta`, saturating at both 0 and 255.
    pub fn brightness(&mut self, delta: i32) {
        brighten_bytes(self.data_mut(), delta);
    }

    pub fn threshold(&mut self, level: u8) {
        threshold_bytes(self.data_mut(), level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn all_values() -> Vec<u8> {
        (0..=255u8).collect()
    }

    #[test]
    fn negative_example() {
        let mut px = vec![
            Pixel::new(0, 0, 0),
            Pixel::new(255, 255, 255),
            Pixel::new(128, 128, 128),
            Pixel::new(64, 64, 64),
        ];
        negate_pixels(&mut px);
        assert_eq!(
            px,
            vec![
                Pixel::new(255, 255, 255),
                Pixel::new(0, 0, 0),
                Pixel::new(127, 127, 127),
                Pixel::new(191, 191, 191),
            ]
        );
    }

    #[test]
    fn negative_is_involutive() {
        let original = all_values();
        let mut bytes = original.clone();
        negate_bytes(&mut bytes);
        negate_bytes(&mut bytes);
        assert_eq!(bytes, original);
    }

    #[test]
    fn grayscale_truncates() {
        let mut px = vec![Pixel::new(1, 1, 2), Pixel::new(255, 255, 254)];
        grayscale_pixels(&mut px);
        assert_eq!(px[0], Pixel::new(1, 1, 1));
        assert_eq!(px[1], Pixel::new(254, 254, 254));
    }

    #[test]
    fn brightness_saturates_high() {
        for delta in [0, 1, 17, 200, 255, 1000, i32::MAX] {
            let mut bytes = all_values();
            brighten_bytes(&mut bytes, delta);
            for (c, out) in (0..=255i64).zip(&bytes) {
                if c + i64::from(delta) > 255 {
                    assert_eq!(*out, 255);
                } else {
                    assert_eq!(i64::from(*out), c + i64::from(delta));
                }
            }
        }
    }

    #[test]
    fn brightness_floors_at_zero() {
        let mut px = vec![Pixel::new(10, 50, 200)];
        brighten_pixels(&mut px, -60);
        assert_eq!(px[0], Pixel::new(0, 0, 140));
        brighten_pixels(&mut px, i32::MIN);
        assert_eq!(px[0], Pixel::new(0, 0, 0));
    }

    #[test]
    fn threshold_is_idempotent() {
        for level in [0u8, 1, 127, 128, 254, 255] {
            let mut once = all_values();
            threshold_bytes(&mut once, level);
            let mut twice = once.clone();
            threshold_bytes(&mut twice, level);
            assert_eq!(once, twice);
            assert!(once.iter().all(|b| *b == 0 || *b == 255));
        }
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let mut bytes = vec![99, 100, 101];
        threshold_bytes(&mut bytes, 100);
        assert_eq!(bytes, vec![0, 255, 255]);
    }
}
