use crate::cursor::Cursor;
use crate::decode::Decode;
use crate::error::Result;
use crate::read::{Kind, Reader};
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Any JSON value, for destinations whose shape isn't known statically.
///
/// Numbers are always `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Num(f64),
    Str(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Num(_))
    }
    pub fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }
    pub fn as_bool(&self) -> Option<bool> {
        opt_extract!(self, Self::Bool(b) => Some(*b))
    }
    pub fn as_f64(&self) -> Option<f64> {
        opt_extract!(self, Self::Num(n) => Some(*n))
    }
    pub fn as_str(&self) -> Option<&str> {
        opt_extract!(self, Self::Str(s) => Some(&s[..]))
    }
    pub fn as_array(&self) -> Option<&[Value]> {
        opt_extract!(self, Self::Array(a) => Some(&a[..]))
    }
    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        opt_extract!(self, Self::Object(o) => Some(o))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(key))
    }
    pub fn at(&self, i: usize) -> Option<&Value> {
        self.as_array().and_then(|a| a.get(i))
    }

    pub fn take(&mut self) -> Value {
        core::mem::replace(self, Self::Null)
    }
}

static NULL: Value = Value::Null;

impl core::ops::Index<usize> for Value {
    type Output = Value;
    fn index(&self, i: usize) -> &Value {
        self.at(i).unwrap_or(&NULL)
    }
}

impl core::ops::Index<&str> for Value {
    type Output = Value;
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.into())
    }
}

impl core::iter::FromIterator<Value> for Value {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl<S: Into<String>> core::iter::FromIterator<(S, Value)> for Value {
    fn from_iter<T: IntoIterator<Item = (S, Value)>>(iter: T) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Decode for Value {
    /// The variant is picked from the first token and the previous contents
    /// are dropped.
    fn decode<C: Cursor>(&mut self, r: &mut Reader<C>) -> Result<()> {
        *self = match r.peek_kind() {
            Kind::Object => {
                let mut o = BTreeMap::<String, Value>::new();
                tri!(o.decode(r));
                Value::Object(o)
            }
            Kind::Array => {
                let mut a = Vec::<Value>::new();
                tri!(a.decode(r));
                Value::Array(a)
            }
            Kind::String => {
                let mut s = String::new();
                tri!(r.read_str_into(&mut s));
                Value::Str(s)
            }
            Kind::True | Kind::False => Value::Bool(tri!(r.read_bool())),
            Kind::Null => {
                tri!(r.read_literal(b"null"));
                Value::Null
            }
            Kind::Number => Value::Num(tri!(r.read_number::<f64>())),
            // reports the bad token
            Kind::None => return r.ignore_value(),
        };
        Ok(())
    }
}
