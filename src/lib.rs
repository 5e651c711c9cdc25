//! # zenbmpfx
//!
//! Uncompressed BMP decoder and encoder for 8-bit and 24-bit images, with
//! in-place pixel transforms, 3×3 (or any odd size) convolution, and
//! histogram equalization.
//!
//! ## Formats
//!
//! - **24-bit**: B,G,R triples, rows padded to a multiple of 4 bytes,
//!   bottom-up (positive height) or top-down (negative height). Headers and
//!   any bytes between the info header and the pixel data are kept, so an
//!   unmodified image re-encodes byte for byte.
//! - **8-bit**: the 54-byte header and 1024-byte color table are carried as
//!   opaque blobs; pixel data is one flat run of bytes at offset 1078.
//!
//! ## Transforms
//!
//! | operation    | 24-bit | 8-bit |
//! |--------------|--------|-------|
//! | negative     | yes    | yes   |
//! | brightness   | yes    | yes   |
//! | grayscale    | yes    |       |
//! | threshold    |        | yes   |
//! | apply_filter | edge-clamped | interior only, 3×3 |
//! | equalize     | luminance (YUV) | raw values |
//!
//! ## Non-Goals
//!
//! - Compressed (RLE, bitfields) BMP
//! - Bit depths other than 8 and 24
//! - Palette interpretation
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmpfx::{Bmp24Image, Kernel, KernelKind};
//!
//! let mut img = Bmp24Image::load("photo.bmp")?;
//! img.brightness(20);
//! img.apply_filter(&Kernel::preset(KernelKind::Sharpen))?;
//! img.equalize();
//! img.save("photo-out.bmp")?;
//! # Ok::<(), zenbmpfx::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod error;
mod info;
mod limits;
mod pixel;

pub mod bmp;
pub mod io;
pub mod ops;

// Re-exports
pub use bmp::{Bmp8Image, Bmp24Image, BmpFileHeader, BmpInfoHeader, PixelBuffer24};
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use info::ImageInfo;
pub use limits::Limits;
pub use ops::{Kernel, KernelKind};
pub use pixel::{ColorDepth, Pixel};
