//! 24-bit BMP codec: B,G,R triples, rows padded to 4 bytes, bottom-up by default.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;
use log::debug;

use super::buffer::PixelBuffer24;
use super::header::{
    BMP_MAGIC, BmpFileHeader, BmpInfoHeader, DEFAULT_PIXEL_OFFSET, DEFAULT_RESOLUTION,
    INFO_HEADER_SIZE, row_padding_24, row_stride_24,
};
use crate::error::BitmapError;
use crate::io::{ReadAt, WriteAt};
use crate::limits::{Limits, check_limits};
use crate::pixel::{ColorDepth, Pixel};

/// A decoded 24-bit BMP: headers kept verbatim plus an owned pixel grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bmp24Image {
    file_header: BmpFileHeader,
    info_header: BmpInfoHeader,
    /// Bytes between the end of the info header and the pixel offset.
    gap: Vec<u8>,
    data: PixelBuffer24,
}

impl Bmp24Image {
    /// Create a black image with freshly built headers.
    pub fn allocate(width: u32, height: u32) -> Result<Self, BitmapError> {
        Self::from_buffer(PixelBuffer24::allocate(width, height)?)
    }

    /// Wrap a pixel grid in freshly built headers (bottom-up, 72 DPI).
    pub fn from_buffer(data: PixelBuffer24) -> Result<Self, BitmapError> {
        let (width, height) = (data.width(), data.height());
        let too_large = || BitmapError::DimensionsTooLarge { width, height };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;
        let image_size = row_stride_24(width)
            .and_then(|s| s.checked_mul(height as usize))
            .and_then(|s| u32::try_from(s).ok())
            .ok_or_else(too_large)?;
        let file_size = image_size
            .checked_add(DEFAULT_PIXEL_OFFSET)
            .ok_or_else(too_large)?;

        Ok(Self {
            file_header: BmpFileHeader {
                magic: BMP_MAGIC,
                file_size,
                reserved1: 0,
                reserved2: 0,
                offset: DEFAULT_PIXEL_OFFSET,
            },
            info_header: BmpInfoHeader {
                size: INFO_HEADER_SIZE,
                width: w,
                height: h,
                planes: 1,
                bits: 24,
                compression: 0,
                image_size,
                x_resolution: DEFAULT_RESOLUTION,
                y_resolution: DEFAULT_RESOLUTION,
                colors_used: 0,
                important_colors: 0,
            },
            gap: Vec::new(),
            data,
        })
    }

    /// Decode from any offset-addressable source.
    pub fn read_from<R: ReadAt + ?Sized>(
        src: &mut R,
        limits: Option<&Limits>,
        stop: &dyn Stop,
    ) -> Result<Self, BitmapError> {
        let file_header = BmpFileHeader::read(src)?;
        let info_header = BmpInfoHeader::read(src)?;

        let depth = ColorDepth::from_bits(info_header.bits);
        if depth != Some(ColorDepth::Rgb24) {
            return Err(BitmapError::UnsupportedDepth {
                expected: 24,
                actual: info_header.bits,
            });
        }
        if info_header.compression != 0 {
            return Err(BitmapError::UnsupportedCompression(info_header.compression));
        }
        let (width, height) = info_header.dimensions()?;
        check_limits(limits, width, height, ColorDepth::Rgb24.bytes_per_pixel())?;

        let offset = file_header.offset;
        if offset < DEFAULT_PIXEL_OFFSET {
            return Err(BitmapError::InvalidHeader(alloc::format!(
                "pixel offset {offset} overlaps the headers"
            )));
        }
        let stride = row_stride_24(width).ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let row_bytes = width as usize * 3;
        let pixel_end = u64::from(offset)
            + (stride as u64) * u64::from(height - 1)
            + row_bytes as u64;

        // Probe the last pixel byte so truncated input fails before allocating.
        src.read_at(pixel_end - 1, &mut [0u8; 1])?;
        stop.check()?;

        let gap_len = (offset - DEFAULT_PIXEL_OFFSET) as usize;
        let mut gap = Vec::new();
        gap.try_reserve_exact(gap_len)
            .map_err(|_| BitmapError::OutOfMemory { bytes: gap_len })?;
        gap.resize(gap_len, 0);
        src.read_at(u64::from(DEFAULT_PIXEL_OFFSET), &mut gap)?;

        let mut data = PixelBuffer24::allocate(width, height)?;
        let mut row_buf = vec![0u8; row_bytes];
        let h = height as usize;
        for file_row in 0..h {
            if file_row % 16 == 0 {
                stop.check()?;
            }
            src.read_at(u64::from(offset) + (file_row * stride) as u64, &mut row_buf)?;
            let y = if info_header.is_top_down() {
                file_row
            } else {
                h - 1 - file_row
            };
            for (px, bgr) in data.row_mut(y).iter_mut().zip(row_buf.chunks_exact(3)) {
                *px = Pixel::new(bgr[2], bgr[1], bgr[0]);
            }
        }

        debug!("decoded 24-bit BMP {width}x{height}, pixel offset {offset}");
        Ok(Self {
            file_header,
            info_header,
            gap,
            data,
        })
    }

    /// Encode into any offset-addressable sink, header fields passed through unchanged.
    pub fn write_to<W: WriteAt + ?Sized>(
        &self,
        dst: &mut W,
        stop: &dyn Stop,
    ) -> Result<(), BitmapError> {
        self.file_header.write(dst)?;
        self.info_header.write(dst)?;
        if !self.gap.is_empty() {
            dst.write_at(u64::from(DEFAULT_PIXEL_OFFSET), &self.gap)?;
        }

        let width = self.data.width();
        let h = self.data.height() as usize;
        let stride = row_stride_24(width).ok_or(BitmapError::DimensionsTooLarge {
            width,
            height: self.data.height(),
        })?;
        let pad = row_padding_24(width);
        let offset = u64::from(self.file_header.offset);
        let mut row_buf = Vec::with_capacity(stride);
        for file_row in 0..h {
            if file_row % 16 == 0 {
                stop.check()?;
            }
            let y = if self.info_header.is_top_down() {
                file_row
            } else {
                h - 1 - file_row
            };
            row_buf.clear();
            for px in self.data.row(y) {
                row_buf.extend_from_slice(&[px.b, px.g, px.r]);
            }
            row_buf.extend(core::iter::repeat_n(0u8, pad));
            dst.write_at(offset + (file_row * stride) as u64, &row_buf)?;
        }
        Ok(())
    }

    /// Decode a complete BMP file held in memory.
    pub fn decode(data: &[u8], limits: Option<&Limits>, stop: impl Stop) -> Result<Self, BitmapError> {
        let mut src = data;
        Self::read_from(&mut src, limits, &stop)
    }

    /// Encode to a complete BMP file in memory.
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        let mut out = Vec::new();
        out.try_reserve_exact(self.encoded_len())
            .map_err(|_| BitmapError::OutOfMemory {
                bytes: self.encoded_len(),
            })?;
        self.write_to(&mut out, &stop)?;
        Ok(out)
    }

    /// Load a 24-bit BMP from disk.
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

    fn encoded_len(&self) -> usize {
        let stride = row_stride_24(self.data.width()).unwrap_or(0);
        self.file_header.offset as usize + stride * self.data.height() as usize
    }

    pub fn width(&self) -> u32 {
        self.data.width()
    }

    pub fn height(&self) -> u32 {
        self.data.height()
    }

    pub fn color_depth(&self) -> ColorDepth {
        ColorDepth::Rgb24
    }

    pub fn file_header(&self) -> &BmpFileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &BmpInfoHeader {
        &self.info_header
    }

    pub fn pixels(&self) -> &PixelBuffer24 {
        &self.data
    }

    pub fn pixels_mut(&mut self) -> &mut PixelBuffer24 {
        &mut self.data
    }

    pub fn into_pixels(self) -> PixelBuffer24 {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    /// 2x2 bottom-up file: top row red, green; bottom row blue, white.
    fn tiny_file() -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(b"BM");
        out.extend_from_slice(&70u32.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&54u32.to_le_bytes());
        out.extend_from_slice(&40u32.to_le_bytes());
        out.extend_from_slice(&2i32.to_le_bytes());
        out.extend_from_slice(&2i32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&24u16.to_le_bytes());
        out.extend_from_slice(&[0u8; 24]);
        // bottom row first: blue, white, 2 pad bytes
        out.extend_from_slice(&[255, 0, 0, 255, 255, 255, 0, 0]);
        // top row: red, green, 2 pad bytes
        out.extend_from_slice(&[0, 0, 255, 0, 255, 0, 0, 0]);
        out
    }

    #[test]
    fn decodes_bgr_bottom_up_with_padding() {
        let img = Bmp24Image::decode(&tiny_file(), None, Unstoppable).unwrap();
        assert_eq!((img.width(), img.height()), (2, 2));
        let px = img.pixels();
        assert_eq!(px.get(0, 0), Pixel::new(255, 0, 0));
        assert_eq!(px.get(1, 0), Pixel::new(0, 255, 0));
        assert_eq!(px.get(0, 1), Pixel::new(0, 0, 255));
        assert_eq!(px.get(1, 1), Pixel::new(255, 255, 255));
    }

    #[test]
    fn reencode_is_byte_exact() {
        let file = tiny_file();
        let img = Bmp24Image::decode(&file, None, Unstoppable).unwrap();
        assert_eq!(img.encode(Unstoppable).unwrap(), file);
    }

    #[test]
    fn top_down_rows_keep_their_order() {
        let mut file = tiny_file();
        file[0x16..0x1A].copy_from_slice(&(-2i32).to_le_bytes());
        let img = Bmp24Image::decode(&file, None, Unstoppable).unwrap();
        assert!(img.info_header().is_top_down());
        assert_eq!(img.pixels().get(0, 0), Pixel::new(0, 0, 255));
        assert_eq!(img.encode(Unstoppable).unwrap(), file);
    }

    #[test]
    fn gap_before_pixels_survives() {
        let base = tiny_file();
        let mut file = base[..54].to_vec();
        file.extend_from_slice(&[0xAB; 6]);
        file.extend_from_slice(&base[54..]);
        file[0x0A..0x0E].copy_from_slice(&60u32.to_le_bytes());
        let img = Bmp24Image::decode(&file, None, Unstoppable).unwrap();
        assert_eq!(img.pixels().get(1, 1), Pixel::new(255, 255, 255));
        assert_eq!(img.encode(Unstoppable).unwrap(), file);
    }

    #[test]
    fn rejects_wrong_depth_and_compression() {
        let mut file = tiny_file();
        file[0x1C] = 8;
        assert!(matches!(
            Bmp24Image::decode(&file, None, Unstoppable),
            Err(BitmapError::UnsupportedDepth {
                expected: 24,
                actual: 8
            })
        ));

        let mut file = tiny_file();
        file[0x1E] = 1;
        assert!(matches!(
            Bmp24Image::decode(&file, None, Unstoppable),
            Err(BitmapError::UnsupportedCompression(1))
        ));
    }

    #[test]
    fn truncated_pixels_fail_cleanly() {
        let file = tiny_file();
        assert!(matches!(
            Bmp24Image::decode(&file[..60], None, Unstoppable),
            Err(BitmapError::UnexpectedEof)
        ));
        // Missing trailing padding on the last row is tolerated.
        assert!(Bmp24Image::decode(&file[..file.len() - 2], None, Unstoppable).is_ok());
    }

    #[test]
    fn limits_reject_before_allocation() {
        let limits = Limits {
            max_width: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            Bmp24Image::decode(&tiny_file(), Some(&limits), Unstoppable),
            Err(BitmapError::LimitExceeded(_))
        ));
    }

    #[test]
    fn allocate_builds_consistent_headers() {
        let img = Bmp24Image::allocate(3, 2).unwrap();
        let fh = img.file_header();
        let ih = img.info_header();
        assert_eq!(fh.magic, BMP_MAGIC);
        assert_eq!(fh.offset, 54);
        assert_eq!(ih.image_size, 24);
        assert_eq!(fh.file_size, 78);
        assert_eq!(ih.bits, 24);
        assert_eq!(img.encode(Unstoppable).unwrap().len(), 78);
    }
}
