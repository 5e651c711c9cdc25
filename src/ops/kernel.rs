use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::error::BitmapError;

/// Named 3×3 kernels.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KernelKind {
    BoxBlur,
    GaussianBlur,
    Outline,
    Emboss,
    Sharpen,
}

impl KernelKind {
    pub const ALL: [KernelKind; 5] = [
        Self::BoxBlur,
        Self::GaussianBlur,
        Self::Outline,
        Self::Emboss,
        Self::Sharpen,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BoxBlur => "box_blur",
            Self::GaussianBlur => "gaussian_blur",
            Self::Outline => "outline",
            Self::Emboss => "emboss",
            Self::Sharpen => "sharpen",
        }
    }

    fn rows(&self) -> [[f32; 3]; 3] {
        const NINTH: f32 = 1.0 / 9.0;
        const SIXTEENTH: f32 = 1.0 / 16.0;
        match self {
            Self::BoxBlur => [[NINTH; 3]; 3],
            Self::GaussianBlur => [
                [SIXTEENTH, 2.0 * SIXTEENTH, SIXTEENTH],
                [2.0 * SIXTEENTH, 4.0 * SIXTEENTH, 2.0 * SIXTEENTH],
                [SIXTEENTH, 2.0 * SIXTEENTH, SIXTEENTH],
            ],
            Self::Outline => [[-1.0, -1.0, -1.0], [-1.0, 8.0, -1.0], [-1.0, -1.0, -1.0]],
            Self::Emboss => [[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]],
            Self::Sharpen => [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]],
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `box_blur`, `box-blur`, `box`, and so on, case-insensitively.
impl FromStr for KernelKind {
    type Err = BitmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase().replace('-', "_");
        match lower.as_str() {
            "box_blur" | "box" | "blur" => Ok(Self::BoxBlur),
            "gaussian_blur" | "gaussian" => Ok(Self::GaussianBlur),
            "outline" | "edge" => Ok(Self::Outline),
            "emboss" => Ok(Self::Emboss),
            "sharpen" => Ok(Self::Sharpen),
            _ => Err(BitmapError::InvalidKernel(alloc::format!(
                "unknown kernel name {s:?}"
            ))),
        }
    }
}

/// A square convolution kernel with odd side length.
///
/// `weight(i, j)` is indexed `[i][j]`; during convolution `i` follows the
/// x offset and `j` the y offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Build from `size * size` weights in `[i][j]` order.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, BitmapError> {
        if size == 0 || size % 2 == 0 {
            return Err(BitmapError::InvalidKernel(alloc::format!(
                "size {size} is not odd"
            )));
        }
        if size.checked_mul(size) != Some(weights.len()) {
            return Err(BitmapError::InvalidKernel(alloc::format!(
                "{} weights for a {size}x{size} kernel",
                weights.len()
            )));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(BitmapError::InvalidKernel("non-finite weight".into()));
        }
        Ok(Self { size, weights })
    }

    pub fn from_rows<const N: usize>(rows: [[f32; N]; N]) -> Result<Self, BitmapError> {
        Self::new(N, rows.iter().flatten().copied().collect())
    }

    pub fn preset(kind: KernelKind) -> Self {
        let weights = kind.rows().iter().flatten().copied().collect();
        Self { size: 3, weights }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn radius(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> f32 {
        self.weights[i * self.size + j]
    }
}

impl From<KernelKind> for Kernel {
    fn from(kind: KernelKind) -> Self {
        Self::preset(kind)
    }
}
