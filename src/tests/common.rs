// src/tests/common.rs

//! Common inputs, fixtures, and mock sources for tests.

#![allow(non_upper_case_globals)]

use crate::common::FileOffset;
use crate::readers::readat::ReadAt;

use std::cell::Cell;
use std::io::{Error, ErrorKind, Result, Write};

use ::lazy_static::lazy_static;
use ::tempfile::NamedTempFile;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// inputs
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// five lines, no trailing line ending, length 27
pub const DATA_STARTEND: &str = "Start\nLine1\nLine2\nLine3\nEnd";

/// two CRLF-terminated lines, length 14
pub const DATA_CRLF: &str = "Line1\r\nLine2\r\n";

pub const DATA_EMPTY: &str = "";

/// one unterminated line
pub const DATA_NO_NL: &str = "no newline here";

/// only a line ending
pub const DATA_NL_ONLY: &str = "\n";

/// a line ending at offset 0; the empty run before it is never returned
pub const DATA_LEADING_NL: &str = "\nLine";

/// empty lines, CRLF lines, a bare CR mid-line, an unterminated tail
pub const DATA_MIXED: &str = "alpha\n\nbeta\r\ngam\rma\n\r\n\ndelta";

/// expected `(fileoffset, line)` pairs for [`DATA_STARTEND`], in the
/// order a backward scan returns them
pub const CHECKS_STARTEND: [(FileOffset, &str); 5] = [
    (24, "End"),
    (18, "Line3"),
    (12, "Line2"),
    (6, "Line1"),
    (0, "Start"),
];

/// expected `(fileoffset, line)` pairs for [`DATA_CRLF`]; the empty first
/// pair is the line following the trailing line ending
pub const CHECKS_CRLF: [(FileOffset, &str); 3] = [
    (14, ""),
    (7, "Line2"),
    (0, "Line1"),
];

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// temporary file fixtures
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Testing helper function to write a `str` to a temporary file.
pub fn create_temp_file(data: &str) -> NamedTempFile {
    let mut ntf = match NamedTempFile::new() {
        Ok(val) => val,
        Err(err) => {
            panic!("NamedTempFile::new() return Err {}", err);
        }
    };
    match ntf.write_all(data.as_bytes()) {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::write_all() return Err {}", err);
        }
    }
    match ntf.flush() {
        Ok(_) => {}
        Err(err) => {
            panic!("NamedTempFile::flush() return Err {}", err);
        }
    }

    ntf
}

lazy_static! {
    pub static ref NTF_STARTEND: NamedTempFile = create_temp_file(DATA_STARTEND);
    pub static ref NTF_CRLF: NamedTempFile = create_temp_file(DATA_CRLF);
    pub static ref NTF_EMPTY: NamedTempFile = create_temp_file(DATA_EMPTY);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// mock sources
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A `ReadAt` source whose every read fails with the given kind.
pub struct ErrReadAt {
    pub kind: ErrorKind,
}

impl ReadAt for ErrReadAt {
    fn read_at(
        &self,
        _buf: &mut [u8],
        _offset: FileOffset,
    ) -> Result<usize> {
        Err(Error::new(self.kind, "injected read failure"))
    }
}

/// A `ReadAt` source that fails its first read with
/// `ErrorKind::Interrupted`, then delegates to the wrapped bytes.
pub struct InterruptOnce<'a> {
    pub data: &'a [u8],
    pub interrupted: Cell<bool>,
}

impl<'a> InterruptOnce<'a> {
    pub fn new(data: &'a [u8]) -> InterruptOnce<'a> {
        InterruptOnce {
            data,
            interrupted: Cell::new(false),
        }
    }
}

impl ReadAt for InterruptOnce<'_> {
    fn read_at(
        &self,
        buf: &mut [u8],
        offset: FileOffset,
    ) -> Result<usize> {
        if !self.interrupted.get() {
            self.interrupted.set(true);
            return Err(Error::new(ErrorKind::Interrupted, "interrupted"));
        }
        self.data.read_at(buf, offset)
    }
}

/// A `ReadAt` source that records whether `close` was called.
pub struct CloseTrack {
    pub data: Vec<u8>,
    pub closed: bool,
}

impl CloseTrack {
    pub fn new(data: &str) -> CloseTrack {
        CloseTrack {
            data: data.as_bytes().to_vec(),
            closed: false,
        }
    }
}

impl ReadAt for CloseTrack {
    fn read_at(
        &self,
        buf: &mut [u8],
        offset: FileOffset,
    ) -> Result<usize> {
        self.data.read_at(buf, offset)
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;

        Ok(())
    }
}
