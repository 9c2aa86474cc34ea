//! Destinations for decoded string bytes.

use crate::error::{ErrorKind, Result};
use crate::read::Reader;
use crate::{Cursor, Decode};

/// Receives the bytes of one string, after escape processing.
pub trait Sink {
    /// Called before the first byte of a string.
    fn reset(&mut self);
    /// Returns false when the destination is full, which aborts the decode.
    fn put(&mut self, b: u8) -> bool;
    /// Called once after the closing quote.
    fn terminate(&mut self);
}

/// Throws everything away. Used by the ignore decoder.
#[derive(Debug, Copy, Clone, Default)]
pub struct Discard;

impl Sink for Discard {
    fn reset(&mut self) {}
    fn put(&mut self, _: u8) -> bool {
        true
    }
    fn terminate(&mut self) {}
}

impl Sink for Vec<u8> {
    fn reset(&mut self) {
        self.clear();
    }
    fn put(&mut self, b: u8) -> bool {
        self.push(b);
        true
    }
    fn terminate(&mut self) {}
}

/// Growable buffer with a hard byte limit, reused for object keys.
#[derive(Debug, Clone)]
pub(crate) struct KeyBuf {
    bytes: Vec<u8>,
    limit: usize,
}

impl KeyBuf {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Sink for KeyBuf {
    fn reset(&mut self) {
        self.bytes.clear();
    }
    fn put(&mut self, b: u8) -> bool {
        if self.bytes.len() >= self.limit {
            return false;
        }
        self.bytes.push(b);
        true
    }
    fn terminate(&mut self) {}
}

/// A string with fixed inline capacity of `N` bytes.
///
/// Decoding a longer string fails with [`ErrorKind::StringCapacity`] instead
/// of truncating.
#[derive(Clone, Copy)]
pub struct FixedStr<const N: usize> {
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> FixedStr<N> {
    pub const CAPACITY: usize = N;

    pub const fn new() -> Self {
        Self {
            buf: [0; N],
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// `None` if the contents are not utf-8, which can't happen for values
    /// produced by a successful decode.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(self.as_bytes()).ok()
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.as_str() {
            Some(s) => s.fmt(f),
            None => self.as_bytes().fmt(f),
        }
    }
}

impl<const N: usize> PartialEq for FixedStr<N> {
    fn eq(&self, o: &Self) -> bool {
        self.as_bytes() == o.as_bytes()
    }
}

impl<const N: usize> PartialEq<str> for FixedStr<N> {
    fn eq(&self, o: &str) -> bool {
        self.as_bytes() == o.as_bytes()
    }
}

impl<const N: usize> PartialEq<&str> for FixedStr<N> {
    fn eq(&self, o: &&str) -> bool {
        self.as_bytes() == o.as_bytes()
    }
}

impl<const N: usize> Sink for FixedStr<N> {
    fn reset(&mut self) {
        self.len = 0;
    }
    fn put(&mut self, b: u8) -> bool {
        if self.len >= N {
            return false;
        }
        self.buf[self.len] = b;
        self.len += 1;
        true
    }
    fn terminate(&mut self) {}
}

impl<const N: usize> Decode for FixedStr<N> {
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        tri!(r.read_string(self));
        if core::str::from_utf8(self.as_bytes()).is_err() {
            self.len = 0;
            return Err(r.err(ErrorKind::InvalidUtf8));
        }
        Ok(())
    }
}
