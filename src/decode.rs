use crate::cursor::Cursor;
use crate::error::{ErrorKind, Result};
use crate::read::Reader;
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// A destination that JSON can be decoded into, in place.
///
/// On error the destination may be partially written.
pub trait Decode {
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()>;
}

macro_rules! impl_decode_num {
    ($($t:ty),*) => {$(
        impl Decode for $t {
            #[inline]
            fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
                *self = tri!(r.read_number::<$t>());
                Ok(())
            }
        }
    )*};
}

impl_decode_num!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Decode for bool {
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        *self = tri!(r.read_bool());
        Ok(())
    }
}

impl Decode for String {
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        r.read_str_into(self)
    }
}

/// Accepts any well-formed value and keeps nothing.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Ignored;

impl Decode for Ignored {
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        r.ignore_value()
    }
}

impl<T: Decode + Default> Decode for Vec<T> {
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        self.clear();
        r.read_array(|r, _| {
            self.push(T::default());
            match self.last_mut() {
                Some(v) => v.decode(r),
                None => Ok(()),
            }
        })
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        r.read_array(|r, i| match self.get_mut(i) {
            Some(v) => v.decode(r),
            None => Err(r.err(ErrorKind::ArrayCapacity { capacity: N })),
        })
    }
}

impl<V: Decode + Default> Decode for BTreeMap<String, V> {
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        r.read_object(
            |r| {
                let mut k = String::new();
                tri!(r.read_str_into(&mut k));
                Ok(k)
            },
            |r, k| self.entry(k).or_default().decode(r),
        )
    }
}

impl<V, S> Decode for HashMap<String, V, S>
where
    V: Decode + Default,
    S: BuildHasher,
{
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        r.read_object(
            |r| {
                let mut k = String::new();
                tri!(r.read_str_into(&mut k));
                Ok(k)
            },
            |r, k| self.entry(k).or_default().decode(r),
        )
    }
}

/// `null` is `None`; anything else is decoded into a fresh `T::default()`.
impl<T: Decode + Default> Decode for Option<T> {
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        if tri!(r.read_null()) {
            *self = None;
            return Ok(());
        }
        self.insert(T::default()).decode(r)
    }
}

impl<T: Decode + ?Sized> Decode for Box<T> {
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        (**self).decode(r)
    }
}

macro_rules! impl_decode_shared {
    ($($p:ident),*) => {$(
        /// Decodes into a new value and replaces the pointer; other clones
        /// keep the old value.
        impl<T: Decode + Default> Decode for $p<T> {
            fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
                let mut v = T::default();
                tri!(v.decode(r));
                *self = $p::new(v);
                Ok(())
            }
        }
    )*};
}

impl_decode_shared!(Rc, Arc);
