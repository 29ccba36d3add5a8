// src/readers/readat.rs

//! The abstract random-access byte source a [`BackLineReader`] reads.
//!
//! [`ReadAt`] is the whole collaborator-facing contract of this crate:
//! "read bytes at an absolute offset, signal end-of-source by reading
//! zero bytes". Implementations are provided for [`File`], byte slices,
//! and `Vec<u8>`, plus forwarding implementations for references and
//! boxes so a caller may keep ownership of the source.
//!
//! [`BackLineReader`]: crate::readers::backlinereader::BackLineReader
//! [`File`]: std::fs::File

use crate::common::FileOffset;

use std::fs::File;
use std::io::{Error, ErrorKind, Result};

/// A random-access byte source.
///
/// Reads never depend on, and must not disturb, any internal "current
/// position" the source may also have (the [`File`] implementation on
/// Windows does move the file cursor; a [`BackLineReader`] never relies
/// on it).
///
/// [`File`]: std::fs::File
/// [`BackLineReader`]: crate::readers::backlinereader::BackLineReader
pub trait ReadAt {
    /// Read bytes into `buf` starting at absolute byte `offset`,
    /// returning how many bytes were read.
    ///
    /// A return of `Ok(0)` with a non-empty `buf` means `offset` is at or
    /// past the end of the source. A short read is not an error.
    fn read_at(
        &self,
        buf: &mut [u8],
        offset: FileOffset,
    ) -> Result<usize>;

    /// Read exactly `buf.len()` bytes starting at absolute byte `offset`.
    ///
    /// Loops over [`read_at`], retrying `ErrorKind::Interrupted`.
    /// Running out of source bytes before `buf` is filled is
    /// `ErrorKind::UnexpectedEof`. A source that reaches its end on the
    /// same read that delivers the final requested byte reports success;
    /// the end-of-source signal is suppressed since the read target was
    /// satisfied.
    ///
    /// [`read_at`]: self::ReadAt#tymethod.read_at
    fn read_exact_at(
        &self,
        mut buf: &mut [u8],
        mut offset: FileOffset,
    ) -> Result<()> {
        while !buf.is_empty() {
            match self.read_at(buf, offset) {
                Ok(0) => break,
                Ok(n) => {
                    let tmp = buf;
                    buf = &mut tmp[n..];
                    offset += n as FileOffset;
                }
                Err(ref err) if err.kind() == ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        if !buf.is_empty() {
            return Err(Error::new(ErrorKind::UnexpectedEof, "failed to fill whole buffer"));
        }

        Ok(())
    }

    /// Release the source, if it has anything to release.
    ///
    /// A source without a close operation leaves this default, a no-op,
    /// not an error.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl ReadAt for File {
    #[cfg(unix)]
    fn read_at(
        &self,
        buf: &mut [u8],
        offset: FileOffset,
    ) -> Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }

    #[cfg(windows)]
    fn read_at(
        &self,
        buf: &mut [u8],
        offset: FileOffset,
    ) -> Result<usize> {
        std::os::windows::fs::FileExt::seek_read(self, buf, offset)
    }
}

impl ReadAt for [u8] {
    fn read_at(
        &self,
        buf: &mut [u8],
        offset: FileOffset,
    ) -> Result<usize> {
        if offset >= self.len() as FileOffset {
            return Ok(0);
        }
        let avail: &[u8] = &self[offset as usize..];
        let n: usize = std::cmp::min(buf.len(), avail.len());
        buf[..n].copy_from_slice(&avail[..n]);

        Ok(n)
    }
}

impl ReadAt for Vec<u8> {
    fn read_at(
        &self,
        buf: &mut [u8],
        offset: FileOffset,
    ) -> Result<usize> {
        self.as_slice().read_at(buf, offset)
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &T {
    fn read_at(
        &self,
        buf: &mut [u8],
        offset: FileOffset,
    ) -> Result<usize> {
        (**self).read_at(buf, offset)
    }

    // a shared reference cannot close the underlying source
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &mut T {
    fn read_at(
        &self,
        buf: &mut [u8],
        offset: FileOffset,
    ) -> Result<usize> {
        (**self).read_at(buf, offset)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<T: ReadAt + ?Sized> ReadAt for Box<T> {
    fn read_at(
        &self,
        buf: &mut [u8],
        offset: FileOffset,
    ) -> Result<usize> {
        (**self).read_at(buf, offset)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
