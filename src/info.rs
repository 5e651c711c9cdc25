use core::fmt;

use crate::bmp::{BMP_MAGIC, Bmp8Image, Bmp24Image};
use crate::error::BitmapError;

/// Image metadata, readable without decoding pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Pixel data size in bytes as stored in the header (may be 0).
    pub data_size: u32,
}

impl ImageInfo {
    /// Probe header fields without decoding.
    ///
    /// Unlike [`Bmp8Image::decode`], which treats the header as an opaque
    /// blob, the probe requires the `BM` magic. An 8-bit data size of 0 is
    /// resolved to `width * height` the same way the decoder does; other
    /// depths report the raw field.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        if data.len() < 54 {
            return Err(BitmapError::UnexpectedEof);
        }
        let magic = u16::from_le_bytes([data[0], data[1]]);
        if magic != BMP_MAGIC {
            return Err(BitmapError::InvalidFormat { magic });
        }
        let u32_at = |i: usize| u32::from_le_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
        let width = (u32_at(0x12) as i32).unsigned_abs();
        let height = (u32_at(0x16) as i32).unsigned_abs();
        let bits_per_pixel = u16::from_le_bytes([data[0x1C], data[0x1D]]);
        let data_size = match u32_at(0x22) {
            0 if bits_per_pixel == 8 => width.saturating_mul(height),
            n => n,
        };
        Ok(Self {
            width,
            height,
            bits_per_pixel,
            compression: u32_at(0x1E),
            data_size,
        })
    }
}

impl From<&Bmp24Image> for ImageInfo {
    fn from(img: &Bmp24Image) -> Self {
        let ih = img.info_header();
        Self {
            width: img.width(),
            height: img.height(),
            bits_per_pixel: ih.bits,
            compression: ih.compression,
            data_size: ih.image_size,
        }
    }
}

impl From<&Bmp8Image> for ImageInfo {
    fn from(img: &Bmp8Image) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            bits_per_pixel: img.color_depth().bits(),
            compression: 0,
            data_size: img.data_size(),
        }
    }
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Image Info:")?;
        writeln!(f, "    Width: {}", self.width)?;
        writeln!(f, "    Height: {}", self.height)?;
        writeln!(f, "    Color Depth: {}", self.bits_per_pixel)?;
        write!(f, "    Data Size: {}", self.data_size)
    }
}
