/// One 24-bit pixel. Stored in memory as R, G, B; on disk as B, G, R.
pub type Pixel = rgb::RGB8;

/// Supported bit depths.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorDepth {
    /// One byte per pixel, index into a 256-entry color table.
    Indexed8,
    /// Three bytes per pixel, B,G,R on disk.
    Rgb24,
}

impl ColorDepth {
    /// Map a `biBitCount` value to a supported depth.
    pub fn from_bits(bits: u16) -> Option<Self> {
        match bits {
            8 => Some(Self::Indexed8),
            24 => Some(Self::Rgb24),
            _ => None,
        }
    }

    /// Bits per pixel as written in the info header.
    pub fn bits(&self) -> u16 {
        match self {
            Self::Indexed8 => 8,
            Self::Rgb24 => 24,
        }
    }

    /// Bytes per pixel in memory.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Indexed8 => 1,
            Self::Rgb24 => 3,
        }
    }
}

/// Clamp an integer channel value into `0..=255`.
#[inline]
pub(crate) fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Round half away from zero. NaN maps to 0.
#[inline]
pub(crate) fn round_i32(v: f32) -> i32 {
    // `v + 0.5` can round up in f32 for values just below one half
    let t = v as i32;
    let frac = v - t as f32;
    if frac >= 0.5 {
        t.saturating_add(1)
    } else if frac <= -0.5 {
        t.saturating_sub(1)
    } else {
        t
    }
}

/// Round a float channel value and clamp it into `0..=255`.
#[inline]
pub(crate) fn round_u8(v: f32) -> u8 {
    clamp_u8(round_i32(v))
}
