use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind, Result};
use crate::fields::{Entry, FieldTable};
use crate::sink::{Discard, KeyBuf, Sink};

/// Decoder settings.
///
/// ```
/// let opts = pocojson::Options::DEFAULT.max_depth(16).allow_trailing(true);
/// assert_eq!(opts.max_depth, 16);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Options {
    /// Longest object key (in bytes, after unescaping) accepted for struct
    /// destinations. Map keys are unbounded.
    pub key_capacity: usize,
    /// How many objects/arrays may be open at once.
    pub max_depth: usize,
    /// Permit non-whitespace input after the top-level value.
    pub allow_trailing: bool,
}

impl Options {
    pub const DEFAULT: Self = Self {
        key_capacity: 99,
        max_depth: 128,
        allow_trailing: false,
    };

    pub const fn key_capacity(self, key_capacity: usize) -> Self {
        Self {
            key_capacity,
            ..self
        }
    }
    pub const fn max_depth(self, max_depth: usize) -> Self {
        Self { max_depth, ..self }
    }
    pub const fn allow_trailing(self, allow_trailing: bool) -> Self {
        Self {
            allow_trailing,
            ..self
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What kind of value starts at the current position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Kind {
    Object,
    Array,
    String,
    True,
    False,
    Null,
    Number,
    /// End of input, or a byte that can't start a value.
    None,
}

fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// Recursive-descent JSON reader over a [`Cursor`].
///
/// [`Decode`](crate::Decode) impls drive it; the `read_*` methods each
/// consume exactly one syntactic element (after any leading whitespace).
pub struct Reader<C> {
    cur: C,
    opts: Options,
    depth: usize,
    key: KeyBuf,
    scratch: Vec<u8>,
}

impl<C: Cursor> Reader<C> {
    pub fn new(cur: C) -> Self {
        Self::with_options(cur, Options::DEFAULT)
    }

    pub fn with_options(cur: C, opts: Options) -> Self {
        Self {
            cur,
            opts,
            depth: 0,
            key: KeyBuf::new(opts.key_capacity),
            scratch: Vec::new(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn offset(&self) -> usize {
        self.cur.offset()
    }

    #[cold]
    pub fn err(&self, kind: ErrorKind) -> Error {
        Error::at(kind, self.cur.consumed())
    }

    /// Error for a byte that isn't what the grammar wants here.
    #[cold]
    fn unexpected(&self, what: &'static str) -> Error {
        if self.cur.at_end() {
            self.err(ErrorKind::UnexpectedEnd)
        } else {
            self.err(ErrorKind::Expected(what))
        }
    }

    /// Skips whitespace; returns whether any input remains.
    pub fn skip_ws(&mut self) -> bool {
        while !self.cur.at_end() && is_ws(self.cur.peek()) {
            self.cur.skip();
        }
        !self.cur.at_end()
    }

    /// Classifies the next value without consuming it.
    pub fn peek_kind(&mut self) -> Kind {
        if !self.skip_ws() {
            return Kind::None;
        }
        match self.cur.peek() {
            b'{' => Kind::Object,
            b'[' => Kind::Array,
            b'"' => Kind::String,
            b't' => Kind::True,
            b'f' => Kind::False,
            b'n' => Kind::Null,
            b'-' | b'+' | b'0'..=b'9' => Kind::Number,
            _ => Kind::None,
        }
    }

    /// Consumes `lit` exactly, after whitespace.
    pub fn read_literal(&mut self, lit: &[u8]) -> Result<()> {
        if !self.skip_ws() {
            return Err(self.err(ErrorKind::UnexpectedEnd));
        }
        for &want in lit {
            if self.cur.peek() != want {
                return Err(self.err(ErrorKind::InvalidLiteral));
            }
            self.cur.skip();
        }
        Ok(())
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.peek_kind() {
            Kind::True => self.read_literal(b"true").map(|_| true),
            Kind::False => self.read_literal(b"false").map(|_| false),
            _ => Err(self.unexpected("boolean")),
        }
    }

    /// Consumes `null` if that's what comes next, leaving anything else.
    pub fn read_null(&mut self) -> Result<bool> {
        if self.peek_kind() != Kind::Null {
            return Ok(false);
        }
        tri!(self.read_literal(b"null"));
        Ok(true)
    }

    fn push_digits(&mut self) -> usize {
        let mut n = 0;
        while self.cur.peek().is_ascii_digit() {
            self.scratch.push(self.cur.take());
            n += 1;
        }
        n
    }

    /// Validates one number and leaves its text in the scratch buffer.
    /// Returns true if it had a fraction or exponent.
    fn scan_number(&mut self) -> Result<bool> {
        if !self.skip_ws() {
            return Err(self.err(ErrorKind::UnexpectedEnd));
        }
        self.scratch.clear();
        if self.cur.peek() == b'-' {
            self.scratch.push(self.cur.take());
        }
        match self.cur.peek() {
            b'0' => {
                self.scratch.push(self.cur.take());
                if self.cur.peek().is_ascii_digit() {
                    return Err(self.err(ErrorKind::InvalidNumber));
                }
            }
            b'1'..=b'9' => {
                self.push_digits();
            }
            _ => return Err(self.err(ErrorKind::InvalidNumber)),
        }
        let mut fractional = false;
        if self.cur.peek() == b'.' {
            fractional = true;
            self.scratch.push(self.cur.take());
            if self.push_digits() == 0 {
                return Err(self.err(ErrorKind::InvalidNumber));
            }
        }
        if matches!(self.cur.peek(), b'e' | b'E') {
            fractional = true;
            self.scratch.push(self.cur.take());
            if matches!(self.cur.peek(), b'+' | b'-') {
                self.scratch.push(self.cur.take());
            }
            if self.push_digits() == 0 {
                return Err(self.err(ErrorKind::InvalidNumber));
            }
        }
        Ok(fractional)
    }

    /// Reads a number into any [`Number`] destination.
    pub fn read_number<N: Number>(&mut self) -> Result<N> {
        let fractional = tri!(self.scan_number());
        if N::INTEGRAL && fractional {
            return Err(self.err(ErrorKind::FractionalInteger));
        }
        // the scanner only ever pushes ascii
        let text = match core::str::from_utf8(&self.scratch) {
            Ok(t) => t,
            Err(_) => return Err(self.err(ErrorKind::InvalidNumber)),
        };
        match N::from_text(text) {
            Some(n) => Ok(n),
            None => Err(self.err(ErrorKind::NumberOutOfRange)),
        }
    }

    fn unescape_next<S: Sink>(&mut self, sink: &mut S) -> Result<()> {
        let b = match self.cur.take() {
            b'b' => b'\x08',
            b'f' => b'\x0c',
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'\\' => b'\\',
            b'/' => b'/',
            b'"' => b'"',
            b'u' => return Err(self.err(ErrorKind::UnicodeEscape)),
            0 if self.cur.at_end() => return Err(self.err(ErrorKind::UnexpectedEnd)),
            _ => return Err(self.err(ErrorKind::InvalidEscape)),
        };
        if !sink.put(b) {
            return Err(self.err(ErrorKind::StringCapacity));
        }
        Ok(())
    }

    /// Reads one string, feeding its unescaped bytes to `sink`.
    pub fn read_string<S: Sink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        self.read_string_sized(&mut SinkRef(sink))
    }

    fn read_string_sized<S: Sink>(&mut self, sink: &mut S) -> Result<()> {
        if !self.skip_ws() {
            return Err(self.err(ErrorKind::UnexpectedEnd));
        }
        if self.cur.peek() != b'"' {
            return Err(self.err(ErrorKind::Expected("string")));
        }
        self.cur.skip();
        sink.reset();
        loop {
            if self.cur.at_end() {
                return Err(self.err(ErrorKind::UnexpectedEnd));
            }
            match self.cur.take() {
                b'"' => break,
                b'\\' => tri!(self.unescape_next(sink)),
                c if c < 0x20 => return Err(self.err(ErrorKind::ControlCharacter)),
                c => {
                    if !sink.put(c) {
                        return Err(self.err(ErrorKind::StringCapacity));
                    }
                }
            }
        }
        sink.terminate();
        Ok(())
    }

    /// Reads a string into `dest`, replacing its contents.
    pub fn read_str_into(&mut self, dest: &mut String) -> Result<()> {
        let mut buf = core::mem::take(&mut self.scratch);
        let res = self.read_string_sized(&mut buf);
        let res = res.and_then(|()| match core::str::from_utf8(&buf) {
            Ok(s) => {
                dest.clear();
                dest.push_str(s);
                Ok(())
            }
            Err(_) => Err(self.err(ErrorKind::InvalidUtf8)),
        });
        self.scratch = buf;
        res
    }

    /// Reads an object key into the reader's bounded key buffer and
    /// resolves it against `table`.
    pub fn read_field(&mut self, table: &FieldTable) -> Result<Option<&'static Entry>> {
        let mut key = core::mem::replace(&mut self.key, KeyBuf::new(0));
        let res = self.read_string_sized(&mut key);
        self.key = key;
        tri!(res);
        Ok(table.resolve(self.key.as_bytes()))
    }

    /// The last key read by [`read_field`](Self::read_field).
    pub fn last_key(&self) -> &[u8] {
        self.key.as_bytes()
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.opts.max_depth {
            return Err(self.err(ErrorKind::DepthLimit {
                limit: self.opts.max_depth,
            }));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn open(&mut self, b: u8, what: &'static str) -> Result<()> {
        if !self.skip_ws() {
            return Err(self.err(ErrorKind::UnexpectedEnd));
        }
        if self.cur.peek() != b {
            return Err(self.err(ErrorKind::Expected(what)));
        }
        self.cur.skip();
        tri!(self.enter());
        self.skip_ws();
        Ok(())
    }

    /// Returns true for `,`, false for `close`. A comma directly followed by
    /// `close` is rejected.
    fn comma_or_end(&mut self, close: u8, what: &'static str) -> Result<bool> {
        self.skip_ws();
        match self.cur.peek() {
            b',' => {
                self.cur.skip();
                self.skip_ws();
                if self.cur.peek() == close {
                    return Err(self.err(ErrorKind::TrailingComma));
                }
                Ok(true)
            }
            c if c == close && !self.cur.at_end() => {
                self.cur.skip();
                Ok(false)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    /// Reads `{ key: value, ... }`.
    ///
    /// `key` reads one key and returns whatever `value` needs to know about
    /// it; `value` then reads the member value.
    pub fn read_object<K, FK, FV>(&mut self, mut key: FK, mut value: FV) -> Result<()>
    where
        FK: FnMut(&mut Self) -> Result<K>,
        FV: FnMut(&mut Self, K) -> Result<()>,
    {
        tri!(self.open(b'{', "object"));
        if self.cur.peek() == b'}' {
            self.cur.skip();
            self.leave();
            return Ok(());
        }
        loop {
            let k = tri!(key(self));
            self.skip_ws();
            if self.cur.peek() != b':' {
                return Err(self.unexpected("`:`"));
            }
            self.cur.skip();
            tri!(value(self, k));
            if !tri!(self.comma_or_end(b'}', "`,` or `}`")) {
                break;
            }
        }
        self.leave();
        Ok(())
    }

    /// Reads `[ elem, ... ]`, calling `elem` with each zero-based index.
    pub fn read_array<F>(&mut self, mut elem: F) -> Result<()>
    where
        F: FnMut(&mut Self, usize) -> Result<()>,
    {
        tri!(self.open(b'[', "array"));
        if self.cur.peek() == b']' {
            self.cur.skip();
            self.leave();
            return Ok(());
        }
        let mut i = 0;
        loop {
            tri!(elem(self, i));
            i += 1;
            if !tri!(self.comma_or_end(b']', "`,` or `]`")) {
                break;
            }
        }
        self.leave();
        Ok(())
    }

    /// Validates and discards one value of any shape.
    pub fn ignore_value(&mut self) -> Result<()> {
        match self.peek_kind() {
            Kind::Object => self.read_object(
                |r| r.read_string(&mut Discard),
                |r, ()| r.ignore_value(),
            ),
            Kind::Array => self.read_array(|r, _| r.ignore_value()),
            Kind::String => self.read_string(&mut Discard),
            Kind::True => self.read_literal(b"true"),
            Kind::False => self.read_literal(b"false"),
            Kind::Null => self.read_literal(b"null"),
            Kind::Number => self.scan_number().map(|_| ()),
            Kind::None => Err(self.unexpected("value")),
        }
    }

    /// Checks that only whitespace remains (unless trailing data is allowed).
    pub fn finish(&mut self) -> Result<()> {
        if self.skip_ws() && !self.opts.allow_trailing {
            return Err(self.err(ErrorKind::TrailingCharacters));
        }
        Ok(())
    }
}

/// Lets `read_string` accept unsized sinks while the loop stays generic.
struct SinkRef<'s, S: ?Sized>(&'s mut S);

impl<S: Sink + ?Sized> Sink for SinkRef<'_, S> {
    fn reset(&mut self) {
        self.0.reset()
    }
    fn put(&mut self, b: u8) -> bool {
        self.0.put(b)
    }
    fn terminate(&mut self) {
        self.0.terminate()
    }
}

/// Numeric destinations.
pub trait Number: Sized + Copy {
    /// Integral destinations reject fractions and exponents.
    const INTEGRAL: bool;
    /// Converts grammar-checked text. `None` means out of range.
    fn from_text(text: &str) -> Option<Self>;
}

macro_rules! impl_number {
    (@signed $($t:ty),*) => {$(
        impl Number for $t {
            const INTEGRAL: bool = true;
            fn from_text(text: &str) -> Option<Self> {
                text.parse().ok()
            }
        }
    )*};
    (@unsigned $($t:ty),*) => {$(
        impl Number for $t {
            const INTEGRAL: bool = true;
            fn from_text(text: &str) -> Option<Self> {
                // `-0` is the only negative spelling of a representable value
                if text == "-0" {
                    return Some(0);
                }
                text.parse().ok()
            }
        }
    )*};
    (@float $($t:ty),*) => {$(
        impl Number for $t {
            const INTEGRAL: bool = false;
            fn from_text(text: &str) -> Option<Self> {
                text.parse::<$t>().ok().filter(|v| v.is_finite())
            }
        }
    )*};
}

impl_number!(@signed i8, i16, i32, i64, i128, isize);
impl_number!(@unsigned u8, u16, u32, u64, u128, usize);
impl_number!(@float f32, f64);
