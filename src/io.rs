//! Offset-addressed byte I/O.
//!
//! The codecs never stream: every header field and pixel row is read or
//! written at an absolute offset. In-memory buffers implement the traits
//! directly; files and other `std::io` streams go through [`SeekStream`].

use alloc::vec::Vec;

use crate::error::BitmapError;

/// Read exactly `buf.len()` bytes starting at an absolute offset.
pub trait ReadAt {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), BitmapError>;

    /// Read a little-endian `u16` at `offset`.
    fn read_u16_le(&mut self, offset: u64) -> Result<u16, BitmapError> {
        let mut b = [0u8; 2];
        self.read_at(offset, &mut b)?;
        Ok(u16::from_le_bytes(b))
    }

    /// Read a little-endian `u32` at `offset`.
    fn read_u32_le(&mut self, offset: u64) -> Result<u32, BitmapError> {
        let mut b = [0u8; 4];
        self.read_at(offset, &mut b)?;
        Ok(u32::from_le_bytes(b))
    }
}

/// Write all of `buf` starting at an absolute offset.
pub trait WriteAt {
    fn write_at(&mut self, offset: u64, buf: &[u8]) -> Result<(), BitmapError>;
}

fn to_index(offset: u64) -> Result<usize, BitmapError> {
    usize::try_from(offset).map_err(|_| BitmapError::UnexpectedEof)
}

impl ReadAt for &[u8] {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), BitmapError> {
        let start = to_index(offset)?;
        let end = start
            .checked_add(buf.len())
            .ok_or(BitmapError::UnexpectedEof)?;
        let src = self.get(start..end).ok_or(BitmapError::UnexpectedEof)?;
        buf.copy_from_slice(src);
        Ok(())
    }
}

/// Writing past the end grows the vector, zero-filling any gap.
impl WriteAt for Vec<u8> {
    fn write_at(&mut self, offset: u64, buf: &[u8]) -> Result<(), BitmapError> {
        let start = to_index(offset)?;
        let end = start
            .checked_add(buf.len())
            .ok_or(BitmapError::OutOfMemory { bytes: usize::MAX })?;
        if end > self.len() {
            let extra = end - self.len();
            self.try_reserve(extra)
                .map_err(|_| BitmapError::OutOfMemory { bytes: end })?;
            self.resize(end, 0);
        }
        self[start..end].copy_from_slice(buf);
        Ok(())
    }
}

/// Adapter giving any seekable `std::io` stream seek+read / seek+write
/// semantics.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct SeekStream<T>(pub T);

#[cfg(feature = "std")]
impl<T> SeekStream<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

#[cfg(feature = "std")]
impl<T: std::io::Read + std::io::Seek> ReadAt for SeekStream<T> {
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), BitmapError> {
        self.0.seek(std::io::SeekFrom::Start(offset))?;
        self.0.read_exact(buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                BitmapError::UnexpectedEof
            } else {
                BitmapError::Io(e)
            }
        })
    }
}

#[cfg(feature = "std")]
impl<T: std::io::Write + std::io::Seek> WriteAt for SeekStream<T> {
    fn write_at(&mut self, offset: u64, buf: &[u8]) -> Result<(), BitmapError> {
        self.0.seek(std::io::SeekFrom::Start(offset))?;
        self.0.write_all(buf)?;
        Ok(())
    }
}
