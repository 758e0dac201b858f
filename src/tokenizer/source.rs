//! Byte sources
//!
//! The tokenizer pulls its input through `ByteSource`, one byte per call.
//! Anything that can hand out bytes in order (a memory slice, a file, a
//! network response body) plugs in here; the tokenizer never sees where
//! the bytes come from.

use std::io::Read;

use crate::error::{ParamError, Result};

/// Produces bytes in order and signals end-of-source
pub trait ByteSource {
    /// Next byte, or `None` once the source is exhausted
    ///
    /// A failing underlying transport surfaces as `SourceUnavailable`.
    fn next_byte(&mut self) -> Result<Option<u8>>;
}

/// Byte source over an in-memory slice
#[derive(Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        match self.data.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                Ok(Some(b))
            }
            None => Ok(None),
        }
    }
}

/// Byte source over any `std::io::Read`
///
/// Covers both file and network-response streaming; callers that care about
/// syscall overhead wrap the reader in a `BufReader` first.
#[derive(Debug)]
pub struct ReaderSource<R: Read> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Recover the wrapped reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(ParamError::SourceUnavailable(e.to_string())),
            }
        }
    }
}

/// Caps consumption of an inner source at a fixed byte budget
///
/// Used when the transport announces a content length: bytes past the limit
/// are left in the inner source untouched and the tokenizer sees a clean
/// end-of-source instead.
#[derive(Debug)]
pub struct LimitedSource<S: ByteSource> {
    inner: S,
    remaining: usize,
}

impl<S: ByteSource> LimitedSource<S> {
    pub fn new(inner: S, limit: usize) -> Self {
        Self {
            inner,
            remaining: limit,
        }
    }

    /// Bytes still allowed before the limit cuts the stream
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<S: ByteSource> ByteSource for LimitedSource<S> {
    fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        self.inner.next_byte()
    }
}
