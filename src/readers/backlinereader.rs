// src/readers/backlinereader.rs

//! Implements a [`BackLineReader`], the driver of deriving lines from a
//! [`ReadAt`] source, in reverse order.
//!
//! [`BackLineReader`]: crate::readers::backlinereader::BackLineReader
//! [`ReadAt`]: crate::readers::readat::ReadAt

use crate::common::{BufSz, Bytes, ChunkSz, Count, FileOffset, ResultS3, CRu8, NLu8};
use crate::error::{Error, ErrorKind};
use crate::readers::readat::ReadAt;

use std::fmt;
use std::io;

use ::bstr::BString;
use ::memchr::memrchr;
#[allow(unused_imports)]
use ::more_asserts::{debug_assert_ge, debug_assert_le, debug_assert_lt};
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// BackLineReader
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A typed [`ResultS3`] for function [`BackLineReader::find_line`].
///
/// The `Found` value is the line's absolute byte offset within the source
/// and the line as an independently owned [`BString`] (line ending cut,
/// one trailing `'\r'` cut).
///
/// [`ResultS3`]: crate::common::ResultS3
/// [`BackLineReader::find_line`]: BackLineReader#method.find_line
/// [`BString`]: https://docs.rs/bstr/1.12.0/bstr/struct.BString.html
pub type ResultS3LineFind = ResultS3<(FileOffset, BString), Error>;

/// A typed [`ResultS3`] for function [`BackLineReader::find_line_bytes`].
///
/// Same algorithm and values as [`ResultS3LineFind`] but the `Found` line
/// is a borrowed view into the reader's internal buffer, only valid until
/// the next fetch call (the borrow checker enforces this).
///
/// [`ResultS3`]: crate::common::ResultS3
/// [`BackLineReader::find_line_bytes`]: BackLineReader#method.find_line_bytes
pub type ResultS3LineBytesFind<'a> = ResultS3<(FileOffset, &'a [u8]), Error>;

/// A typed [`ResultS3`] for private function `BackLineReader::fetch_chunk`.
/// `Found(())` means one more chunk was prepended to the buffer.
type ResultFetchChunk = ResultS3<(), Error>;

/// Default chunk fetch size in bytes; how many bytes one underlying read
/// pulls from the source.
pub const CHUNKSZ_DEFAULT: ChunkSz = 1024;

/// Default maximum buffer size in bytes (1 MiB).
///
/// The maximum buffer size is a hard cap on a single line's length; an
/// unterminated line keeps accumulating chunks until it would pass this.
pub const MAX_BUFSZ_DEFAULT: BufSz = 1024 * 1024;

/// Options for [`BackLineReader::new_opts`].
///
/// A zero value in either field falls back to the built-in default at
/// construction ([`CHUNKSZ_DEFAULT`], [`MAX_BUFSZ_DEFAULT`]), so
/// `BackScanOpts::default()` means "all defaults".
///
/// [`BackLineReader::new_opts`]: BackLineReader#method.new_opts
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BackScanOpts {
    /// Bytes pulled per underlying source read.
    pub chunksz: ChunkSz,
    /// Hard cap on total buffered bytes, and so on a single line's length.
    pub max_bufsz: BufSz,
}

/// Latched terminal state of a [`BackLineReader`].
///
/// Once set, every subsequent fetch call reports the same outcome and the
/// source is never read again.
#[derive(Debug, PartialEq)]
enum Terminus {
    /// cursor reached offset 0 and the buffer drained of lines
    Eof,
    /// a single line grew past the configured maximum buffer size
    TooLongLine { needed: BufSz, max_bufsz: BufSz },
    /// underlying read failure; the kind and message of the first error
    Io(io::ErrorKind, String),
}

/// A specialized reader that finds lines within a [`ReadAt`] byte source
/// searching backward from a given starting offset.
///
/// A `BackLineReader` owns a cursor marking the lowest source offset
/// pulled so far, and a buffer holding the contiguous source region
/// `[cursor, lowest offset not yet returned)`. The buffer shrinks from
/// its end as lines are returned and grows at its front as chunks are
/// fetched. Total buffered bytes never pass `max_bufsz`.
///
/// Fetch calls mutate the cursor and buffer in place; one instance is for
/// one sequential caller. Independent instances are fully independent.
///
/// _Not a rust "Reader"; does not implement trait [`Read`]._
///
/// [`ReadAt`]: crate::readers::readat::ReadAt
/// [`Read`]: std::io::Read
pub struct BackLineReader<S: ReadAt> {
    /// The source. Bytes at or after the construction offset are never
    /// read.
    source: S,
    /// Absolute offset of the first byte not yet pulled into `buf`.
    /// Monotonically non-increasing; 0 means the source is fully pulled.
    cursor: FileOffset,
    /// Source bytes fetched but not yet returned as lines; the contiguous
    /// source region starting at `cursor`.
    buf: Bytes,
    /// Deferred shrink of `buf`, applied at the start of the next fetch.
    /// Keeps the most recently returned line view alive in `buf` until
    /// then.
    truncate_at: Option<usize>,
    /// Bytes pulled per underlying source read.
    chunksz: ChunkSz,
    /// Hard cap on `buf` length.
    max_bufsz: BufSz,
    /// Latched terminal state; `None` while lines may remain.
    terminus: Option<Terminus>,
    /// `Count` of lines returned.
    lines_processed: Count,
    /// `Count` of chunk fetches from the source.
    chunks_fetched: Count,
    /// `Count` of bytes fetched from the source.
    bytes_fetched: Count,
}

impl<S: ReadAt> fmt::Debug for BackLineReader<S> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.debug_struct("BackLineReader")
            .field("cursor", &self.cursor)
            .field("buffered", &self.buf.len())
            .field("chunksz", &self.chunksz)
            .field("max_bufsz", &self.max_bufsz)
            .field("terminus", &self.terminus)
            .finish()
    }
}

/// Implement the BackLineReader.
impl<S: ReadAt> BackLineReader<S> {
    /// Create a new `BackLineReader` with default options.
    ///
    /// `pos` is the absolute byte offset at which the backward scan
    /// begins, commonly the length of the source. Bytes at or after `pos`
    /// are never read.
    pub fn new(
        source: S,
        pos: FileOffset,
    ) -> BackLineReader<S> {
        BackLineReader::new_opts(source, pos, BackScanOpts::default())
    }

    /// Create a new `BackLineReader` with explicit options.
    ///
    /// A zero value in either option field silently falls back to the
    /// built-in default. Construction cannot fail.
    pub fn new_opts(
        source: S,
        pos: FileOffset,
        opts: BackScanOpts,
    ) -> BackLineReader<S> {
        defñ!("(pos {}, {:?})", pos, opts);
        let chunksz: ChunkSz = match opts.chunksz {
            0 => CHUNKSZ_DEFAULT,
            sz => sz,
        };
        let max_bufsz: BufSz = match opts.max_bufsz {
            0 => MAX_BUFSZ_DEFAULT,
            sz => sz,
        };

        BackLineReader {
            source,
            cursor: pos,
            buf: Bytes::new(),
            truncate_at: None,
            chunksz,
            max_bufsz,
            terminus: None,
            lines_processed: 0,
            chunks_fetched: 0,
            bytes_fetched: 0,
        }
    }

    /// Bytes pulled per underlying source read.
    #[inline(always)]
    pub const fn chunksz(&self) -> ChunkSz {
        self.chunksz
    }

    /// Hard cap on total buffered bytes, and so on a single line's length.
    #[inline(always)]
    pub const fn max_bufsz(&self) -> BufSz {
        self.max_bufsz
    }

    /// Absolute offset of the first source byte not yet pulled into the
    /// buffer. Monotonically non-increasing over the reader's life.
    #[inline(always)]
    pub const fn cursor(&self) -> FileOffset {
        self.cursor
    }

    /// `Count` of lines returned so far.
    #[inline(always)]
    pub const fn count_lines_processed(&self) -> Count {
        self.lines_processed
    }

    /// `Count` of chunk fetches from the source so far.
    #[inline(always)]
    pub const fn count_chunks_fetched(&self) -> Count {
        self.chunks_fetched
    }

    /// `Count` of bytes fetched from the source so far.
    #[inline(always)]
    pub const fn count_bytes_fetched(&self) -> Count {
        self.bytes_fetched
    }

    /// Find the next line preceding the previously returned line (or
    /// preceding the starting offset on the first call), returning its
    /// absolute byte offset and its bytes as a view into the internal
    /// buffer.
    ///
    /// The view is valid only until the next fetch call; it borrows the
    /// reader. The line ending `'\n'` is cut, as is one trailing `'\r'`.
    /// Empty lines are returned.
    ///
    /// The final line (the first in the source) is reported at offset 0
    /// whether or not a line ending precedes it. The call after the final
    /// line returns [`Done`], as does every call after that.
    ///
    /// [`Done`]: crate::common::ResultS3#variant.Done
    pub fn find_line_bytes(&mut self) -> ResultS3LineBytesFind<'_> {
        defn!("(cursor {}, buffered {})", self.cursor, self.buf.len());
        match &self.terminus {
            Some(Terminus::Eof) => {
                defx!("latched Eof; return Done");
                return ResultS3::Done;
            }
            Some(Terminus::TooLongLine { needed, max_bufsz }) => {
                let (needed, max_bufsz) = (*needed, *max_bufsz);
                defx!("latched TooLongLine; return Err");
                return ResultS3::Err(Error::new(ErrorKind::TooLongLine { needed, max_bufsz }));
            }
            Some(Terminus::Io(kind, message)) => {
                let err = io::Error::new(*kind, message.clone());
                defx!("latched Io; return Err({})", err);
                return ResultS3::Err(Error::from(err));
            }
            None => {}
        }
        self.drain_returned();
        loop {
            if let Some(index) = memrchr(NLu8, &self.buf) {
                let fileoffset: FileOffset = self.cursor + (index as FileOffset) + 1;
                self.truncate_at = Some(index);
                self.lines_processed += 1;
                let line: &[u8] = strip_cr(&self.buf[index + 1..]);
                defx!("return Found(({}, {} bytes))", fileoffset, line.len());
                return ResultS3::Found((fileoffset, line));
            }
            // no line separator buffered; need more data
            match self.fetch_chunk() {
                ResultFetchChunk::Found(_) => {}
                ResultFetchChunk::Done => {
                    if !self.buf.is_empty() {
                        // the earliest line; whether or not it was
                        // separator-terminated, it is reported at offset 0
                        self.truncate_at = Some(0);
                        self.lines_processed += 1;
                        let line: &[u8] = strip_cr(&self.buf);
                        defx!("source exhausted; return Found((0, {} bytes))", line.len());
                        return ResultS3::Found((0, line));
                    }
                    defx!("source exhausted; return Done");
                    return ResultS3::Done;
                }
                ResultFetchChunk::Err(err) => {
                    defx!("return Err({})", err);
                    return ResultS3::Err(err);
                }
            }
        }
    }

    /// Find the next line preceding the previously returned line,
    /// returning its absolute byte offset and an independently owned copy
    /// of its bytes.
    ///
    /// Same algorithm as [`find_line_bytes`], differing only in the final
    /// materialization: the returned [`BString`] does not alias the
    /// internal buffer, trading a copy for safety against buffer reuse.
    ///
    /// [`find_line_bytes`]: BackLineReader#method.find_line_bytes
    /// [`BString`]: https://docs.rs/bstr/1.12.0/bstr/struct.BString.html
    pub fn find_line(&mut self) -> ResultS3LineFind {
        match self.find_line_bytes() {
            ResultS3::Found((fileoffset, line)) => ResultS3::Found((fileoffset, BString::from(line))),
            ResultS3::Done => ResultS3::Done,
            ResultS3::Err(err) => ResultS3::Err(err),
        }
    }

    /// Close the underlying source, consuming the reader.
    ///
    /// A pass-through to [`ReadAt::close`]; for sources without a close
    /// operation this is a no-op, not an error.
    ///
    /// [`ReadAt::close`]: crate::readers::readat::ReadAt#method.close
    pub fn close(mut self) -> crate::error::Result<()> {
        defñ!();
        self.source
            .close()
            .map_err(Error::from)
    }

    /// Shrink `buf` past the most recently returned line, deferred from
    /// the fetch call that returned it so the borrowed view stayed valid.
    fn drain_returned(&mut self) {
        if let Some(at) = self.truncate_at.take() {
            defo!("truncate buffered {} to {}", self.buf.len(), at);
            self.buf.truncate(at);
        }
    }

    /// Pull one more chunk from the source and prepend it to `buf`.
    ///
    /// Fetches `min(chunksz, cursor)` bytes ending at the old cursor;
    /// never reads before offset 0. Latches the terminal state on
    /// exhaustion, cap violation, or read failure.
    fn fetch_chunk(&mut self) -> ResultFetchChunk {
        defn!("(cursor {})", self.cursor);
        if self.cursor == 0 {
            self.terminus = Some(Terminus::Eof);
            defx!("cursor 0; return Done");
            return ResultFetchChunk::Done;
        }
        let fetch_sz: ChunkSz = std::cmp::min(self.chunksz, self.cursor);
        self.cursor -= fetch_sz;
        let needed: BufSz = fetch_sz + (self.buf.len() as BufSz);
        if needed > self.max_bufsz {
            self.terminus = Some(Terminus::TooLongLine { needed, max_bufsz: self.max_bufsz });
            defx!("needed {} > max_bufsz {}; return Err", needed, self.max_bufsz);
            return ResultFetchChunk::Err(Error::new(ErrorKind::TooLongLine {
                needed,
                max_bufsz: self.max_bufsz,
            }));
        }
        let mut buf_next: Bytes = Bytes::with_capacity(needed as usize);
        buf_next.resize(fetch_sz as usize, 0);
        defo!("read_exact_at({} bytes, offset {})", fetch_sz, self.cursor);
        match self
            .source
            .read_exact_at(&mut buf_next[..], self.cursor)
        {
            Ok(_) => {}
            Err(err) => {
                self.terminus = Some(Terminus::Io(err.kind(), err.to_string()));
                defx!("read_exact_at error; return Err({})", err);
                return ResultFetchChunk::Err(Error::from(err));
            }
        }
        // the fetched bytes precede the buffered bytes in the source
        buf_next.extend_from_slice(&self.buf);
        self.buf = buf_next;
        self.chunks_fetched += 1;
        self.bytes_fetched += fetch_sz as Count;
        debug_assert_le!(
            self.buf.len() as BufSz,
            self.max_bufsz,
            "buffered {} bytes exceeds max_bufsz {}",
            self.buf.len(),
            self.max_bufsz
        );
        defx!("fetched {} bytes at cursor {}; buffered {}; return Found", fetch_sz, self.cursor, self.buf.len());

        ResultFetchChunk::Found(())
    }
}

/// Cut one trailing carriage return from `line`.
fn strip_cr(line: &[u8]) -> &[u8] {
    match line.last() {
        Some(&CRu8) => &line[..line.len() - 1],
        _ => line,
    }
}
