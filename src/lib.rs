// src/lib.rs

//! Read lines of a file backward, last line first, without reading the
//! entire file into memory.
//!
//! A [`BackLineReader`] is given a random-access byte source (anything
//! implementing [`ReadAt`]; a [`File`] or a byte slice) and a starting byte
//! offset, commonly the length of the source. Each call to
//! [`find_line`] or [`find_line_bytes`] returns the line preceding the
//! previously returned line, along with the absolute byte offset of that
//! line within the source. Bytes are pulled from the source in fixed-size
//! chunks, so memory use is bounded by the configured maximum buffer size
//! no matter how large the source is.
//!
//! The intended use is scanning large append-only logs from the end
//! backward, e.g. searching for the last occurrence of a pattern.
//!
//! ```rust
//! use backscan::{BackLineReader, ResultS3};
//!
//! let input = "Line1\nLine2\nLine3";
//! let mut blr = BackLineReader::new(input.as_bytes(), input.len() as u64);
//! loop {
//!     match blr.find_line() {
//!         ResultS3::Found((pos, line)) => {
//!             println!("Line position: {:2}, line: {:?}", pos, line);
//!         }
//!         ResultS3::Done => break,
//!         ResultS3::Err(err) => {
//!             eprintln!("Error: {}", err);
//!             break;
//!         }
//!     }
//! }
//! ```
//!
//! prints
//!
//! ```text
//! Line position: 12, line: "Line3"
//! Line position:  6, line: "Line2"
//! Line position:  0, line: "Line1"
//! ```
//!
//! Line endings are cut from the returned lines; a single trailing `'\r'`
//! is also cut. Empty lines are returned. After the last line (the first
//! in the source) has been returned, subsequent calls report
//! [`ResultS3::Done`].
//!
//! [`BackLineReader`]: crate::readers::backlinereader::BackLineReader
//! [`ReadAt`]: crate::readers::readat::ReadAt
//! [`File`]: std::fs::File
//! [`find_line`]: crate::readers::backlinereader::BackLineReader#method.find_line
//! [`find_line_bytes`]: crate::readers::backlinereader::BackLineReader#method.find_line_bytes

pub mod common;
pub mod error;
pub mod readers;
#[cfg(test)]
pub mod tests;

pub use common::ResultS3;
pub use error::{Error, ErrorKind, Result};
pub use readers::backlinereader::{BackLineReader, BackScanOpts};
pub use readers::readat::ReadAt;
