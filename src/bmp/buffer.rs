//! Contiguous 24-bit pixel grid.

use alloc::vec::Vec;

use imgref::{ImgRef, ImgRefMut, ImgVec};

use crate::error::BitmapError;
use crate::pixel::Pixel;

/// A `width × height` grid of [`Pixel`]s in one allocation, row 0 on top.
///
/// Shape is fixed at construction. Filters change values, never dimensions.
#[derive(Clone, Debug)]
pub struct PixelBuffer24 {
    img: ImgVec<Pixel>,
}

impl PixelBuffer24 {
    /// Allocate a black buffer. Fails with `OutOfMemory` instead of aborting.
    pub fn allocate(width: u32, height: u32) -> Result<Self, BitmapError> {
        check_nonzero(width, height)?;
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let bytes = count
            .checked_mul(size_of::<Pixel>())
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let mut buf: Vec<Pixel> = Vec::new();
        buf.try_reserve_exact(count)
            .map_err(|_| BitmapError::OutOfMemory { bytes })?;
        buf.resize(count, Pixel::new(0, 0, 0));
        Ok(Self {
            img: ImgVec::new(buf, width as usize, height as usize),
        })
    }

    /// Wrap existing pixels. `pixels.len()` must be exactly `width * height`.
    pub fn from_pixels(pixels: Vec<Pixel>, width: u32, height: u32) -> Result<Self, BitmapError> {
        check_nonzero(width, height)?;
        let needed = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        if pixels.len() != needed {
            return Err(BitmapError::BufferTooSmall {
                needed: needed * size_of::<Pixel>(),
                actual: pixels.len() * size_of::<Pixel>(),
            });
        }
        Ok(Self {
            img: ImgVec::new(pixels, width as usize, height as usize),
        })
    }

    pub fn width(&self) -> u32 {
        self.img.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.img.height() as u32
    }

    /// Pixel at column `x`, row `y`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Pixel {
        self.img[(x, y)]
    }

    /// Pixel at `(x, y)` with both coordinates clamped into the grid.
    #[inline]
    pub fn get_clamped(&self, x: isize, y: isize) -> Pixel {
        let cx = x.clamp(0, self.img.width() as isize - 1) as usize;
        let cy = y.clamp(0, self.img.height() as isize - 1) as usize;
        self.img[(cx, cy)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, px: Pixel) {
        self.img[(x, y)] = px;
    }

    pub fn row(&self, y: usize) -> &[Pixel] {
        let w = self.img.width();
        &self.img.buf()[y * w..(y + 1) * w]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [Pixel] {
        let w = self.img.width();
        &mut self.img.buf_mut()[y * w..(y + 1) * w]
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Pixel] {
        self.img.buf()
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        self.img.buf_mut()
    }

    pub fn as_imgref(&self) -> ImgRef<'_, Pixel> {
        self.img.as_ref()
    }

    pub fn as_imgref_mut(&mut self) -> ImgRefMut<'_, Pixel> {
        self.img.as_mut()
    }

    pub fn into_imgvec(self) -> ImgVec<Pixel> {
        self.img
    }
}

fn check_nonzero(width: u32, height: u32) -> Result<(), BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "zero-sized image {width}x{height}"
        )));
    }
    Ok(())
}

impl PartialEq for PixelBuffer24 {
    fn eq(&self, other: &Self) -> bool {
        self.img.width() == other.img.width()
            && self.img.height() == other.img.height()
            && self.pixels() == other.pixels()
    }
}

impl Eq for PixelBuffer24 {}
