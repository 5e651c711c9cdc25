use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, encoding, and filtering.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("not a BMP file (magic {magic:#06x})")]
    InvalidFormat { magic: u16 },

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported bit depth {actual}, expected {expected}")]
    UnsupportedDepth { expected: u16, actual: u16 },

    #[error("unsupported compression type {0}")]
    UnsupportedCompression(u32),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("out of memory allocating {bytes} bytes")]
    OutOfMemory { bytes: usize },

    #[error("kernel of size {size} is too large for an image of height {height}")]
    KernelTooLarge { size: usize, height: u32 },

    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),

    #[cfg(feature = "std")]
    #[error("cannot open {}: {source}", path.display())]
    OpenFailed {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
