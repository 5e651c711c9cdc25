//! BITMAPFILEHEADER (14 bytes) and BITMAPINFOHEADER (40 bytes).

use crate::error::BitmapError;
use crate::io::{ReadAt, WriteAt};

/// `"BM"` read as a little-endian `u16`.
pub const BMP_MAGIC: u16 = 0x4D42;
/// Size of the file header; also the offset of the info header.
pub const FILE_HEADER_SIZE: u32 = 14;
/// Size of a BITMAPINFOHEADER.
pub const INFO_HEADER_SIZE: u32 = 40;
/// Offset of the pixel data when nothing sits between the headers and the pixels.
pub const DEFAULT_PIXEL_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

const MAGIC_AT: u64 = 0x00;
const SIZE_AT: u64 = 0x02;
const OFFSET_AT: u64 = 0x0A;

/// 72 DPI in pixels per meter.
pub(crate) const DEFAULT_RESOLUTION: i32 = 2835;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpFileHeader {
    pub magic: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Absolute offset of the first pixel row.
    pub offset: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfoHeader {
    pub size: u32,
    pub width: i32,
    /// Positive: rows stored bottom-up. Negative: top-down.
    pub height: i32,
    pub planes: u16,
    pub bits: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_resolution: i32,
    pub y_resolution: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl BmpFileHeader {
    /// Read the file header at offset 0, rejecting anything that isn't `BM`.
    pub fn read<R: ReadAt + ?Sized>(src: &mut R) -> Result<Self, BitmapError> {
        let magic = src.read_u16_le(MAGIC_AT)?;
        if magic != BMP_MAGIC {
            return Err(BitmapError::InvalidFormat { magic });
        }
        Ok(Self {
            magic,
            file_size: src.read_u32_le(SIZE_AT)?,
            reserved1: src.read_u16_le(0x06)?,
            reserved2: src.read_u16_le(0x08)?,
            offset: src.read_u32_le(OFFSET_AT)?,
        })
    }

    pub fn to_bytes(&self) -> [u8; FILE_HEADER_SIZE as usize] {
        let mut out = [0u8; FILE_HEADER_SIZE as usize];
        out[0..2].copy_from_slice(&self.magic.to_le_bytes());
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        out[10..14].copy_from_slice(&self.offset.to_le_bytes());
        out
    }

    pub fn write<W: WriteAt + ?Sized>(&self, dst: &mut W) -> Result<(), BitmapError> {
        dst.write_at(MAGIC_AT, &self.to_bytes())
    }
}

impl BmpInfoHeader {
    /// Read the 40-byte info header at offset 14.
    pub fn read<R: ReadAt + ?Sized>(src: &mut R) -> Result<Self, BitmapError> {
        let mut b = [0u8; INFO_HEADER_SIZE as usize];
        src.read_at(u64::from(FILE_HEADER_SIZE), &mut b)?;
        Ok(Self::from_bytes(&b))
    }

    pub fn from_bytes(b: &[u8; INFO_HEADER_SIZE as usize]) -> Self {
        let u32_at = |i: usize| u32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        let i32_at = |i: usize| i32::from_le_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        let u16_at = |i: usize| u16::from_le_bytes([b[i], b[i + 1]]);
        Self {
            size: u32_at(0),
            width: i32_at(4),
            height: i32_at(8),
            planes: u16_at(12),
            bits: u16_at(14),
            compression: u32_at(16),
            image_size: u32_at(20),
            x_resolution: i32_at(24),
            y_resolution: i32_at(28),
            colors_used: u32_at(32),
            important_colors: u32_at(36),
        }
    }

    pub fn to_bytes(&self) -> [u8; INFO_HEADER_SIZE as usize] {
        let mut out = [0u8; INFO_HEADER_SIZE as usize];
        out[0..4].copy_from_slice(&self.size.to_le_bytes());
        out[4..8].copy_from_slice(&self.width.to_le_bytes());
        out[8..12].copy_from_slice(&self.height.to_le_bytes());
        out[12..14].copy_from_slice(&self.planes.to_le_bytes());
        out[14..16].copy_from_slice(&self.bits.to_le_bytes());
        out[16..20].copy_from_slice(&self.compression.to_le_bytes());
        out[20..24].copy_from_slice(&self.image_size.to_le_bytes());
        out[24..28].copy_from_slice(&self.x_resolution.to_le_bytes());
        out[28..32].copy_from_slice(&self.y_resolution.to_le_bytes());
        out[32..36].copy_from_slice(&self.colors_used.to_le_bytes());
        out[36..40].copy_from_slice(&self.important_colors.to_le_bytes());
        out
    }

    pub fn write<W: WriteAt + ?Sized>(&self, dst: &mut W) -> Result<(), BitmapError> {
        dst.write_at(u64::from(FILE_HEADER_SIZE), &self.to_bytes())
    }

    /// Rows are stored top row first.
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Validated `(width, height)` in pixels.
    pub fn dimensions(&self) -> Result<(u32, u32), BitmapError> {
        if self.width <= 0 {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "width {} is not positive",
                self.width
            )));
        }
        if self.height == 0 {
            return Err(BitmapError::InvalidHeader("height is zero".into()));
        }
        Ok((self.width.unsigned_abs(), self.height.unsigned_abs()))
    }
}

/// Bytes per on-disk 24-bit row, padded to a multiple of 4.
pub(crate) fn row_stride_24(width: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

/// Zero bytes appended after each 24-bit row: `(4 - (width*3) % 4) % 4`.
pub(crate) fn row_padding_24(width: u32) -> usize {
    (4 - (width as usize * 3) % 4) % 4
}
