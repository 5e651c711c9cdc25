//! Uncompressed BMP codecs for 8-bit and 24-bit images.

mod bmp24;
mod bmp8;
mod buffer;
mod header;

pub use bmp8::{Bmp8Image, COLOR_TABLE_SIZE, HEADER_BLOB_SIZE, PIXEL_DATA_OFFSET};
pub use bmp24::Bmp24Image;
pub use buffer::PixelBuffer24;
pub use header::{
    BMP_MAGIC, BmpFileHeader, BmpInfoHeader, DEFAULT_PIXEL_OFFSET, FILE_HEADER_SIZE,
    INFO_HEADER_SIZE,
};

#[cfg(test)]
pub(crate) use bmp8::tests::gray8_file;
