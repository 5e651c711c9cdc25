//! 8-bit BMP codec.
//!
//! The 54-byte header and the 1024-byte color table are opaque blobs copied
//! through unchanged. Pixel bytes are one flat run starting at offset 1078,
//! with no row padding applied.

use alloc::vec::Vec;

use enough::Stop;
use log::debug;

use crate::error::BitmapError;
use crate::io::{ReadAt, WriteAt};
use crate::limits::{Limits, check_limits};
use crate::pixel::ColorDepth;

/// Size of the file + info header blob.
pub const HEADER_BLOB_SIZE: usize = 54;
/// 256 entries × 4 bytes (B, G, R, reserved).
pub const COLOR_TABLE_SIZE: usize = 1024;
/// Offset of the first pixel byte.
pub const PIXEL_DATA_OFFSET: u64 = (HEADER_BLOB_SIZE + COLOR_TABLE_SIZE) as u64;

const WIDTH_AT: usize = 18;
const HEIGHT_AT: usize = 22;
const DEPTH_AT: usize = 28;
const COMPRESSION_AT: usize = 30;
const DATA_SIZE_AT: usize = 34;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bmp8Image {
    header: [u8; HEADER_BLOB_SIZE],
    color_table: [u8; COLOR_TABLE_SIZE],
    data: Vec<u8>,
    width: u32,
    height: u32,
    data_size: u32,
}

fn u32_at(blob: &[u8; HEADER_BLOB_SIZE], at: usize) -> u32 {
    u32::from_le_bytes([blob[at], blob[at + 1], blob[at + 2], blob[at + 3]])
}

impl Bmp8Image {
    /// Decode from any offset-addressable source.
    ///
    /// A zero data-size field means `width * height`. A data size smaller
    /// than `width * height` is rejected.
    pub fn read_from<R: ReadAt + ?Sized>(
        src: &mut R,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<Self, BitmapError> {
        let mut header = [0u8; HEADER_BLOB_SIZE];
        src.read_at(0, &mut header)?;

        let bits = u16::from_le_bytes([header[DEPTH_AT], header[DEPTH_AT + 1]]);
        if ColorDepth::from_bits(bits) != Some(ColorDepth::Indexed8) {
            return Err(BitmapError::UnsupportedDepth {
                expected: 8,
                actual: bits,
            });
        }
        let compression = u32_at(&header, COMPRESSION_AT);
        if compression != 0 {
            return Err(BitmapError::UnsupportedCompression(compression));
        }

        let mut color_table = [0u8; COLOR_TABLE_SIZE];
        src.read_at(HEADER_BLOB_SIZE as u64, &mut color_table)?;

        let width = u32_at(&header, WIDTH_AT);
        if (width as i32) < 0 {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "negative width {}",
                width as i32
            )));
        }
        let height = u32_at(&header, HEIGHT_AT);
        if (height as i32) < 0 {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "negative height {}: top-down 8-bit images are unsupported",
                height as i32
            )));
        }
        check_limits(limits, width, height, ColorDepth::Indexed8.bytes_per_pixel())?;
        let pixel_count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let data_size = match u32_at(&header, DATA_SIZE_AT) {
            0 => u32::try_from(pixel_count)
                .map_err(|_| BitmapError::DimensionsTooLarge { width, height })?,
            n => n,
        };
        if (data_size as usize) < pixel_count {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "data size {data_size} is smaller than {width}x{height}"
            )));
        }
        if let Some(limits) = limits {
            limits.check_memory(data_size as usize)?;
        }
        if data_size > 0 {
            src.read_at(PIXEL_DATA_OFFSET + u64::from(data_size) - 1, &mut [0u8; 1])?;
        }
        stop.check()?;

        let len = data_size as usize;
        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BitmapError::OutOfMemory { bytes: len })?;
        data.resize(len, 0);
        src.read_at(PIXEL_DATA_OFFSET, &mut data)?;

        debug!("decoded 8-bit BMP {width}x{height}, {data_size} data bytes");
        Ok(Self {
            header,
            color_table,
            data,
            width,
            height,
            data_size,
        })
    }

    /// Write header blob, color table, then pixel bytes, verbatim.
    pub fn write_to<W: WriteAt + ?Sized>(
        &self,
        dst: &mut W,
        stop: &dyn Stop,
    ) -> Result<(), BitmapError> {
        dst.write_at(0, &self.header)?;
        dst.write_at(HEADER_BLOB_SIZE as u64, &self.color_table)?;
        stop.check()?;
        dst.write_at(PIXEL_DATA_OFFSET, &self.data)
    }

    /// Decode a complete 8-bit BMP held in memory.
    pub fn decode(data: &[u8], limits: Option<&Limits>, stop: impl Stop) -> Result<Self, BitmapError> {
        let mut src = data;
        Self::read_from(&mut src, limits, &stop)
    }

    /// Encode to a complete 8-bit BMP in memory.
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        let len = PIXEL_DATA_OFFSET as usize + self.data.len();
        let mut out = Vec::new();
        out.try_reserve_exact(len)
            .map_err(|_| BitmapError::OutOfMemory { bytes: len })?;
        self.write_to(&mut out, &stop)?;
        Ok(out)
    }

    /// Load an 8-bit BMP from disk.
    #[cfg(feature = "std")]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, BitmapError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| BitmapError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let mut src = crate::io::SeekStream(file);
        let img = Self::read_from(&mut src, None, &enough::Unstoppable)?;
        debug!("loaded {}", path.display());
        Ok(img)
    }

    /// Write this image to disk, creating or truncating the file.
    #[cfg(feature = "std")]
    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), BitmapError> {
        use std::io::Write as _;

        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| BitmapError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let mut dst = crate::io::SeekStream(std::io::BufWriter::new(file));
        self.write_to(&mut dst, &enough::Unstoppable)?;
        dst.into_inner().flush()?;
        debug!("saved {}", path.display());
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color_depth(&self) -> ColorDepth {
        ColorDepth::Indexed8
    }

    /// Number of pixel bytes, at least `width * height`.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    pub fn header(&self) -> &[u8; HEADER_BLOB_SIZE] {
        &self.header
    }

    pub fn color_table(&self) -> &[u8; COLOR_TABLE_SIZE] {
        &self.color_table
    }

    /// Every pixel byte, including any trailing bytes past `width * height`.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The first `width * height` bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.data[..self.width as usize * self.height as usize]
    }
}
