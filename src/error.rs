// src/error.rs

//! Errors returned by [`BackLineReader`] fetch functions.
//!
//! Exhaustion of the source is not an error; it is reported as
//! [`ResultS3::Done`]. The errors here are the two conditions that end a
//! scan abnormally: an I/O failure from the underlying source, and a line
//! that outgrew the configured maximum buffer size.
//!
//! [`BackLineReader`]: crate::readers::backlinereader::BackLineReader
//! [`ResultS3::Done`]: crate::common::ResultS3

use crate::common::BufSz;

use std::{error, fmt, io, result};

/// A type alias for `Result<T, backscan::Error>`.
///
/// This result type embeds the error type in this crate.
pub type Result<T> = result::Result<T, Error>;

/// An error that can occur while scanning lines backward.
#[derive(Debug)]
pub struct Error(Box<ErrorKind>);

impl Error {
    /// A crate private constructor for `Error`.
    pub(crate) fn new(kind: ErrorKind) -> Error {
        Error(Box::new(kind))
    }

    /// Returns the specific type of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.0
    }

    /// Unwraps this error into its underlying type.
    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    /// Returns `true` if this error is [`ErrorKind::TooLongLine`],
    /// the line-length cap violation.
    ///
    /// [`ErrorKind::TooLongLine`]: self::ErrorKind#variant.TooLongLine
    pub fn is_too_long_line(&self) -> bool {
        matches!(*self.0, ErrorKind::TooLongLine { .. })
    }
}

/// The specific type of an error.
///
/// This list might grow over time and it is not recommended to
/// exhaustively match against it.
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Represents an I/O error.
    ///
    /// Can occur when reading the underlying byte source. Surfaced
    /// verbatim, no retry.
    Io(io::Error),
    /// A single line, or the leading unterminated run of bytes, grew past
    /// the configured maximum buffer size. Pathological input rather than
    /// "no more data"; callers can tell the two apart.
    TooLongLine {
        /// buffer size the next chunk fetch would have needed
        needed: BufSz,
        /// the configured cap
        max_bufsz: BufSz,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self.0 {
            ErrorKind::Io(ref err) => err.fmt(f),
            ErrorKind::TooLongLine { needed, max_bufsz } => write!(
                f,
                "too long line: buffer needs {} bytes, maximum buffer size is {} bytes",
                needed, max_bufsz,
            ),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self.0 {
            ErrorKind::Io(ref err) => Some(err),
            ErrorKind::TooLongLine { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::new(ErrorKind::Io(err))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err.into_kind() {
            ErrorKind::Io(err) => err,
            kind => io::Error::new(io::ErrorKind::Other, Error::new(kind)),
        }
    }
}
