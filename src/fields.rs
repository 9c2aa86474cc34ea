//! Field descriptors and key resolution for struct destinations.
//!
//! A type describes its fields once, as a [`FieldTable`] sorted by name.
//! While decoding an object, each key is matched against that table by
//! [`Resolver`], which narrows a `[low, high]` window over the sorted names
//! one byte at a time. The matching entry's `slot` is handed back to the
//! type's [`Fields::decode_field`]; keys that match nothing have their value
//! skipped.
//!
//! Most types get all of this from [`json_fields!`](crate::json_fields).

use crate::cursor::Cursor;
use crate::error::Result;
use crate::read::Reader;

/// What to do with a field's value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldOption {
    Decode,
    /// The key is known but the value is validated and discarded.
    Skip,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: &'static str,
    /// Declaration index, passed to [`Fields::decode_field`].
    pub slot: usize,
    pub option: FieldOption,
}

impl Entry {
    pub const fn new(name: &'static str, slot: usize, option: FieldOption) -> Self {
        Self { name, slot, option }
    }
}

/// A type's fields, sorted by name (bytewise), names unique.
#[derive(Debug, Copy, Clone)]
pub struct FieldTable {
    entries: &'static [Entry],
}

impl FieldTable {
    /// Panics (at compile time when used in a `const`) if `entries` is not
    /// strictly sorted.
    pub const fn new(entries: &'static [Entry]) -> Self {
        let mut i = 1;
        while i < entries.len() {
            if !name_lt(entries[i - 1].name.as_bytes(), entries[i].name.as_bytes()) {
                panic!("field table must be sorted with unique names");
            }
            i += 1;
        }
        Self { entries }
    }

    pub fn entries(&self) -> &'static [Entry] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolver(&self) -> Resolver<'static> {
        Resolver::new(self.entries)
    }

    pub fn resolve(&self, key: &[u8]) -> Option<&'static Entry> {
        let mut r = self.resolver();
        for &b in key {
            if r.feed(b) == Resolution::Unknown {
                return None;
            }
        }
        r.finish()
    }
}

const fn name_lt(a: &[u8], b: &[u8]) -> bool {
    let mut i = 0;
    while i < a.len() && i < b.len() {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
        i += 1;
    }
    a.len() < b.len()
}

/// Builds a sorted entry array from names given in declaration order.
///
/// Meant for `const` contexts, where a duplicate name is a compile error.
pub const fn sort_entries<const N: usize>(
    names: &[&'static str],
    options: &[FieldOption],
) -> [Entry; N] {
    assert!(names.len() == N && options.len() == N);
    let mut out = [Entry::new("", 0, FieldOption::Decode); N];
    let mut i = 0;
    while i < N {
        out[i] = Entry::new(names[i], i, options[i]);
        i += 1;
    }
    // insertion sort; tables are small and this runs at compile time
    let mut i = 1;
    while i < N {
        let mut j = i;
        while j > 0 && name_lt(out[j].name.as_bytes(), out[j - 1].name.as_bytes()) {
            let t = out[j];
            out[j] = out[j - 1];
            out[j - 1] = t;
            j -= 1;
        }
        i += 1;
    }
    let mut i = 1;
    while i < N {
        if !name_lt(out[i - 1].name.as_bytes(), out[i].name.as_bytes()) {
            panic!("duplicate field name");
        }
        i += 1;
    }
    out
}

/// State of a [`Resolver`] after a byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resolution<'t> {
    /// Some names extend the key, none equals it yet.
    Pending,
    /// The key so far equals this name (a longer name may still match if
    /// more bytes follow).
    Matched(&'t Entry),
    /// No name has the key as a prefix. Further bytes can't change that.
    Unknown,
}

/// Incremental key matcher over a sorted entry slice.
///
/// Invariant: every name in `entries[low..=high]` starts with the bytes fed
/// so far, and `low <= high + 1`.
#[derive(Debug, Clone)]
pub struct Resolver<'t> {
    entries: &'t [Entry],
    low: usize,
    // one past the high candidate, so an empty window never underflows
    high_end: usize,
    pos: usize,
}

impl<'t> Resolver<'t> {
    pub fn new(entries: &'t [Entry]) -> Self {
        Self {
            entries,
            low: 0,
            high_end: entries.len(),
            pos: 0,
        }
    }

    fn name(&self, i: usize) -> &'t [u8] {
        self.entries[i].name.as_bytes()
    }

    pub fn feed(&mut self, c: u8) -> Resolution<'t> {
        let pos = self.pos;
        while self.low < self.high_end {
            let lo = self.name(self.low);
            if lo.len() <= pos || lo[pos] < c {
                self.low += 1;
                continue;
            }
            let hi = self.name(self.high_end - 1);
            if hi.len() <= pos || hi[pos] > c {
                self.high_end -= 1;
                continue;
            }
            break;
        }
        self.pos += 1;
        self.state()
    }

    pub fn feed_all(&mut self, key: &[u8]) -> Resolution<'t> {
        for &b in key {
            if self.feed(b) == Resolution::Unknown {
                return Resolution::Unknown;
            }
        }
        self.state()
    }

    pub fn state(&self) -> Resolution<'t> {
        if self.low >= self.high_end {
            Resolution::Unknown
        } else if self.entries[self.low].name.len() == self.pos {
            Resolution::Matched(&self.entries[self.low])
        } else {
            Resolution::Pending
        }
    }

    /// The entry named exactly by the bytes fed so far.
    pub fn finish(&self) -> Option<&'t Entry> {
        match self.state() {
            Resolution::Matched(e) => Some(e),
            _ => None,
        }
    }
}

/// A struct with a field table.
pub trait Fields {
    const FIELDS: FieldTable;

    /// Decodes the value for the field declared at `slot`.
    fn decode_field<C: Cursor>(&mut self, slot: usize, r: &mut Reader<C>) -> Result<()>;
}

/// Decodes an object into `dest` field by field.
///
/// Unknown keys, and keys whose entry is [`FieldOption::Skip`], have their
/// values skipped; they never affect other fields.
pub fn decode_fields<T: Fields + ?Sized, C: Cursor>(dest: &mut T, r: &mut Reader<C>) -> Result<()> {
    let table = T::FIELDS;
    r.read_object(
        |r| r.read_field(&table),
        |r, found| match found {
            Some(e) if e.option == FieldOption::Decode => dest.decode_field(e.slot, r),
            Some(_) => r.ignore_value(),
            None => {
                tracing::trace!(
                    key = %String::from_utf8_lossy(r.last_key()),
                    "skipping unknown field"
                );
                r.ignore_value()
            }
        },
    )
}
