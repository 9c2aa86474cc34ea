//! A small JSON decoder that reads straight into typed destinations, with
//! no intermediate document tree.
//!
//! Structs describe their fields with a sorted name table (usually via
//! [`json_fields!`]); while reading an object, each key is narrowed against
//! that table a byte at a time and the value goes straight into the matching
//! field. Keys that match nothing are validated and skipped.
//!
//! Only strict JSON is accepted. Some things are deliberately unsupported and
//! fail loudly rather than being approximated: `\u` escapes, and fractions or
//! exponents in integer destinations. There is no serializer.
//!
//! ## Basic Usage
//! ```
//! use std::collections::BTreeMap;
//!
//! #[derive(Default, Debug)]
//! struct Entry {
//!     id: u32,
//!     tags: Vec<String>,
//!     extra: BTreeMap<String, pocojson::Value>,
//!     parent: Option<Box<Entry>>,
//! }
//! pocojson::json_fields!(Entry { id, tags, extra, parent });
//!
//! let e: Entry = pocojson::from_str(r#"{
//!     "id": 7,
//!     "tags": ["a", "b"],
//!     "ignored": [1, 2, {"x": null}],
//!     "extra": {"n": 1.5, "ok": true},
//!     "parent": {"id": 1, "parent": null}
//! }"#).unwrap();
//! assert_eq!(e.id, 7);
//! assert_eq!(e.tags, ["a", "b"]);
//! assert_eq!(e.extra["n"].as_f64(), Some(1.5));
//! assert_eq!(e.parent.map(|p| p.id), Some(1));
//! ```

#[doc(hidden)]
pub extern crate alloc;

macro_rules! opt_extract {
    ($this:expr, $pat:pat => $res:expr) => {
        if let $pat = $this {
            $res
        } else {
            None
        }
    };
}

// `?` expansion currently harms both compile time (lots of llvm instrs
// generated) and runtime :(
macro_rules! tri {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(e) => return Err(e),
        }
    };
}

#[macro_use]
mod mac;

pub mod cursor;
pub mod decode;
pub mod error;
pub mod fields;
pub mod read;
pub mod sink;
pub mod value;

pub use cursor::{Cursor, NulCursor, SliceCursor};
pub use decode::{Decode, Ignored};
pub use error::{Error, ErrorClass, ErrorKind, Result};
pub use fields::{Entry, FieldOption, FieldTable, Fields, Resolution, Resolver};
pub use read::{Kind, Number, Options, Reader};
pub use sink::{Discard, FixedStr, Sink};
pub use value::Value;

/// Decodes `input` into `dest`.
///
/// With `len` of `None` the input ends at its first NUL byte (or the end of
/// the slice); otherwise only the first `len` bytes are read.
pub fn decode<T: Decode + ?Sized>(dest: &mut T, input: &[u8], len: Option<usize>) -> Result<()> {
    decode_with(dest, input, len, &Options::DEFAULT)
}

pub fn decode_with<T: Decode + ?Sized>(
    dest: &mut T,
    input: &[u8],
    len: Option<usize>,
    opts: &Options,
) -> Result<()> {
    match len {
        Some(n) => run(dest, Reader::with_options(SliceCursor::with_len(input, n), *opts)),
        None => run(dest, Reader::with_options(NulCursor::new(input), *opts)),
    }
}

fn run<T: Decode + ?Sized, C: Cursor>(dest: &mut T, mut r: Reader<C>) -> Result<()> {
    let res = dest.decode(&mut r).and_then(|()| r.finish());
    if let Err(e) = &res {
        tracing::debug!(
            kind = %e.kind,
            offset = e.offset,
            line = e.line,
            column = e.column,
            "json decode failed"
        );
    }
    res
}

pub fn from_slice<T: Decode + Default>(input: &[u8]) -> Result<T> {
    let mut v = T::default();
    tri!(decode(&mut v, input, Some(input.len())));
    Ok(v)
}

pub fn from_str<T: Decode + Default>(input: &str) -> Result<T> {
    from_slice(input.as_bytes())
}
