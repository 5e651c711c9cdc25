//! In-place image transforms.
//!
//! All operations are inherent methods on [`Bmp24Image`](crate::Bmp24Image)
//! and [`Bmp8Image`](crate::Bmp8Image); the slice-level building blocks are
//! exported for callers holding raw pixels.

mod adjust;
mod convolve;
mod equalize;
mod kernel;

pub use adjust::{
    brighten_bytes, brighten_pixels, grayscale_pixels, negate_bytes, negate_pixels,
    threshold_bytes,
};
pub use convolve::convolve;
pub use equalize::{
    EqualizationTable, Histogram, cumulative, equalization_table, luminance, rgb_to_yuv,
    yuv_to_rgb,
};
pub use kernel::{Kernel, KernelKind};
