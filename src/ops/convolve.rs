//! Neighborhood filtering.
//!
//! The two depths use different border policies. 24-bit images clamp
//! sample coordinates to the edge so every pixel is filtered; 8-bit images
//! only filter the interior and leave the outermost ring untouched.

use alloc::vec::Vec;

use log::{debug, warn};

use super::kernel::Kernel;
use crate::bmp::{Bmp8Image, Bmp24Image, PixelBuffer24};
use crate::error::BitmapError;
use crate::pixel::{Pixel, round_u8};

/// Filtered value of the pixel at `(x, y)`, sampling with edge replication.
///
/// Sums are accumulated in `f32` and rounded and clamped once per channel.
pub fn convolve(buf: &PixelBuffer24, x: usize, y: usize, kernel: &Kernel) -> Pixel {
    let r = kernel.radius() as isize;
    let (mut sr, mut sg, mut sb) = (0.0f32, 0.0f32, 0.0f32);
    for i in -r..=r {
        for j in -r..=r {
            let w = kernel.weight((i + r) as usize, (j + r) as usize);
            let px = buf.get_clamped(x as isize + i, y as isize + j);
            sr += w * f32::from(px.r);
            sg += w * f32::from(px.g);
            sb += w * f32::from(px.b);
        }
    }
    Pixel::new(round_u8(sr), round_u8(sg), round_u8(sb))
}

fn try_vec<T>(len: usize) -> Result<Vec<T>, BitmapError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|_| BitmapError::OutOfMemory {
        bytes: len.saturating_mul(size_of::<T>()),
    })?;
    Ok(v)
}

impl Bmp24Image {
    /// Filtered value of one pixel. See [`convolve`].
    pub fn convolve(&self, x: usize, y: usize, kernel: &Kernel) -> Pixel {
        convolve(self.pixels(), x, y, kernel)
    }

    /// Convolve the whole image with `kernel`.
    ///
    /// Every output pixel is computed from the unfiltered image, then all of
    /// them are written back at once. A kernel wider than half the image
    /// height is rejected with [`BitmapError::KernelTooLarge`] and the image
    /// is left as it was.
    pub fn apply_filter(&mut self, kernel: &Kernel) -> Result<(), BitmapError> {
        let height = self.height();
        if kernel.size() > (height / 2) as usize {
            warn!(
                "refusing {0}x{0} kernel on image of height {height}",
                kernel.size()
            );
            return Err(BitmapError::KernelTooLarge {
                size: kernel.size(),
                height,
            });
        }

        let (w, h) = (self.width() as usize, height as usize);
        let mut out = try_vec::<Pixel>(w * h)?;
        let src = self.pixels();
        for y in 0..h {
            for x in 0..w {
                out.push(convolve(src, x, y, kernel));
            }
        }
        self.pixels_mut().pixels_mut().copy_from_slice(&out);
        debug!("applied {0}x{0} filter to {w}x{h} image", kernel.size());
        Ok(())
    }
}

impl Bmp8Image {
    /// Convolve interior pixels with a 3×3 kernel.
    ///
    /// Row 0, the last row, column 0 and the last column keep their values.
    /// Only pre-filter values are sampled.
    pub fn apply_filter(&mut self, kernel: &Kernel) -> Result<(), BitmapError> {
        if kernel.size() != 3 {
            return Err(BitmapError::InvalidKernel(alloc::format!(
                "8-bit filtering takes a 3x3 kernel, got {0}x{0}",
                kernel.size()
            )));
        }
        let (w, h) = (self.width() as usize, self.height() as usize);
        if w < 3 || h < 3 {
            warn!("{w}x{h} image has no interior pixels to filter");
            return Ok(());
        }

        let mut original = try_vec::<u8>(w * h)?;
        original.extend_from_slice(self.pixels());
        let data = self.data_mut();
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let mut sum = 0.0f32;
                for i in 0..3 {
                    for j in 0..3 {
                        let sample = original[(y + j - 1) * w + (x + i - 1)];
                        sum += kernel.weight(i, j) * f32::from(sample);
                    }
                }
                data[y * w + x] = round_u8(sum);
            }
        }
        debug!("applied 3x3 filter to interior of {w}x{h} image");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::KernelKind;
    use alloc::vec;

    fn uniform(w: u32, h: u32, v: u8) -> Bmp24Image {
        let px = vec![Pixel::new(v, v, v); (w * h) as usize];
        Bmp24Image::from_buffer(PixelBuffer24::from_pixels(px, w, h).unwrap()).unwrap()
    }

    #[test]
    fn box_blur_keeps_flat_field() {
        let img = uniform(3, 3, 100);
        let k = Kernel::preset(KernelKind::BoxBlur);
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(img.convolve(x, y, &k), Pixel::new(100, 100, 100));
            }
        }
    }

    #[test]
    fn apply_filter_on_flat_field_is_identity() {
        let mut img = uniform(6, 6, 100);
        let before = img.clone();
        img.apply_filter(&Kernel::preset(KernelKind::GaussianBlur))
            .unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn oversized_kernel_is_rejected_without_change() {
        let mut img = uniform(3, 3, 50);
        img.pixels_mut().set(1, 1, Pixel::new(200, 0, 0));
        let before = img.clone();
        let res = img.apply_filter(&Kernel::preset(KernelKind::BoxBlur));
        assert!(matches!(
            res,
            Err(BitmapError::KernelTooLarge { size: 3, height: 3 })
        ));
        assert_eq!(img, before);
    }

    #[test]
    fn edges_are_clamped_not_zero_padded() {
        // A single bright column on the left edge; zero padding would darken it.
        let mut img = uniform(8, 8, 0);
        for y in 0..8 {
            img.pixels_mut().set(0, y, Pixel::new(90, 90, 90));
        }
        img.apply_filter(&Kernel::preset(KernelKind::BoxBlur))
            .unwrap();
        // column 0 sees itself twice (clamped) and column 1 once
        assert_eq!(img.pixels().get(0, 4), Pixel::new(60, 60, 60));
        assert_eq!(img.pixels().get(1, 4), Pixel::new(30, 30, 30));
        assert_eq!(img.pixels().get(2, 4), Pixel::new(0, 0, 0));
    }

    #[test]
    fn filter_reads_only_original_values() {
        // Identity-shifting kernel: output(x, y) = input(x - 1, y), clamped.
        let shift = Kernel::from_rows([[0.0, 1.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]).unwrap();
        let px: Vec<Pixel> = (0..36u8).map(|v| Pixel::new(v, v, v)).collect();
        let mut img =
            Bmp24Image::from_buffer(PixelBuffer24::from_pixels(px, 6, 6).unwrap()).unwrap();
        img.apply_filter(&shift).unwrap();
        for y in 0..6 {
            assert_eq!(img.pixels().get(0, y).r, (y * 6) as u8);
            for x in 1..6 {
                assert_eq!(img.pixels().get(x, y).r, (y * 6 + x - 1) as u8);
            }
        }
    }

    #[test]
    fn channel_sums_clamp_after_accumulation() {
        let mut img = uniform(6, 6, 0);
        img.pixels_mut().set(2, 2, Pixel::new(255, 10, 0));
        img.apply_filter(&Kernel::preset(KernelKind::Outline))
            .unwrap();
        assert_eq!(img.pixels().get(2, 2), Pixel::new(255, 80, 0));
        assert_eq!(img.pixels().get(2, 3), Pixel::new(0, 0, 0));
    }

    #[test]
    fn gray_filter_skips_border() {
        let mut pixels = vec![0u8; 16];
        pixels[5] = 90;
        let file = crate::bmp::gray8_file(4, 4, &pixels);
        let mut img = Bmp8Image::decode(&file, None, enough::Unstoppable).unwrap();
        img.apply_filter(&Kernel::preset(KernelKind::BoxBlur))
            .unwrap();
        let out = img.pixels();
        // interior pixels (1,1), (2,1), (1,2), (2,2) all see the bright one
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            assert_eq!(out[y * 4 + x], 10);
        }
        // border untouched
        assert_eq!(out[0], 0);
        assert_eq!(out[3], 0);
        assert_eq!(out[15], 0);
    }

    #[test]
    fn gray_filter_requires_3x3() {
        let file = crate::bmp::gray8_file(4, 4, &[0; 16]);
        let mut img = Bmp8Image::decode(&file, None, enough::Unstoppable).unwrap();
        let k = Kernel::from_rows([[0.0; 5]; 5]).unwrap();
        assert!(matches!(
            img.apply_filter(&k),
            Err(BitmapError::InvalidKernel(_))
        ));
    }
}
