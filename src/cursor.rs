//! Input sources for [`Reader`](crate::Reader).
//!
//! Every operation is total: reading past the end yields `0` and leaves the
//! offset where it is.

/// A forward-only view of the input bytes.
pub trait Cursor {
    fn at_end(&self) -> bool;
    /// Current byte, or `0` at end of input.
    fn peek(&self) -> u8;
    /// Current byte, advancing past it. Returns `0` without moving at end.
    fn take(&mut self) -> u8;
    /// Advance by one. Callers check `at_end` first.
    fn skip(&mut self);
    fn offset(&self) -> usize;
    /// Everything before the current offset.
    fn consumed(&self) -> &[u8];
}

/// Cursor over an explicitly sized buffer.
#[derive(Debug, Clone)]
pub struct SliceCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Only the first `len` bytes (clamped to the slice) are visible.
    pub fn with_len(bytes: &'a [u8], len: usize) -> Self {
        Self::new(&bytes[..len.min(bytes.len())])
    }
}

impl Cursor for SliceCursor<'_> {
    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }
    #[inline]
    fn peek(&self) -> u8 {
        self.bytes.get(self.pos).copied().unwrap_or(0)
    }
    #[inline]
    fn take(&mut self) -> u8 {
        match self.bytes.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                b
            }
            None => 0,
        }
    }
    #[inline]
    fn skip(&mut self) {
        debug_assert!(!self.at_end());
        self.pos = (self.pos + 1).min(self.bytes.len());
    }
    fn offset(&self) -> usize {
        self.pos
    }
    fn consumed(&self) -> &[u8] {
        &self.bytes[..self.pos]
    }
}

/// Cursor over C-style input: the first NUL byte (or the end of the slice,
/// whichever comes first) ends the stream.
#[derive(Debug, Clone)]
pub struct NulCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> NulCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl Cursor for NulCursor<'_> {
    #[inline]
    fn at_end(&self) -> bool {
        self.peek() == 0
    }
    #[inline]
    fn peek(&self) -> u8 {
        self.bytes.get(self.pos).copied().unwrap_or(0)
    }
    #[inline]
    fn take(&mut self) -> u8 {
        let b = self.peek();
        if b != 0 {
            self.pos += 1;
        }
        b
    }
    #[inline]
    fn skip(&mut self) {
        debug_assert!(!self.at_end());
        if !self.at_end() {
            self.pos += 1;
        }
    }
    fn offset(&self) -> usize {
        self.pos
    }
    fn consumed(&self) -> &[u8] {
        &self.bytes[..self.pos]
    }
}
