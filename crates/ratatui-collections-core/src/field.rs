//! Field resolution: turning an item plus a field name into a comparable [`Value`].
//!
//! Items opt in by implementing [`Record`]. Lookup is lenient: an unknown field resolves to
//! [`Value::Empty`] and an empty indirection (`Option::None`) resolves to [`Value::Absent`].
//! Neither case is an error. Tables that want typo-proof columns should attach an explicit
//! [`Accessor`] to the column instead of relying on names.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// A resolved field value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The item was an empty indirection (for example `Option::None`).
    Absent,
    /// The field does not exist on the item.
    Empty,
    Bool(bool),
    /// Any integer width, widened.
    Int(i128),
    Float(f64),
    Str(String),
}

impl Value {
    /// Returns `true` for [`Value::Absent`] and [`Value::Empty`].
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Absent | Value::Empty)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent | Value::Empty => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(v as i128)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(Value::Absent)
    }
}

/// Items whose fields can be looked up by name.
///
/// Return `None` when `key` does not name a field. Implement this on the aggregate itself;
/// references, smart pointers and `Option` forward to it.
pub trait Record {
    fn field(&self, key: &str) -> Option<Value>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }
}

impl<R: Record + ?Sized> Record for Rc<R> {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }
}

impl<R: Record + ?Sized> Record for Arc<R> {
    fn field(&self, key: &str) -> Option<Value> {
        (**self).field(key)
    }
}

impl<R: Record> Record for Option<R> {
    fn field(&self, key: &str) -> Option<Value> {
        match self {
            Some(r) => r.field(key),
            None => Some(Value::Absent),
        }
    }
}

impl<V: Clone + Into<Value>> Record for BTreeMap<String, V> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned().map(Into::into)
    }
}

impl<V: Clone + Into<Value>> Record for HashMap<String, V> {
    fn field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned().map(Into::into)
    }
}

/// Resolves `key` on `item`, substituting [`Value::Empty`] for unknown fields.
pub fn resolve<R: Record + ?Sized>(item: &R, key: &str) -> Value {
    item.field(key).unwrap_or(Value::Empty)
}

/// Returns `true` if `key` names a field on `item`.
pub fn has_field<R: Record + ?Sized>(item: &R, key: &str) -> bool {
    item.field(key).is_some()
}

/// An explicit per-column value extractor.
pub type Accessor<T> = Rc<dyn Fn(&T) -> Value>;

/// How a sort key is extracted from an item.
pub enum KeySource<'a, T> {
    /// Name lookup through [`Record`].
    Named(&'a str),
    /// Caller-supplied accessor.
    Accessor(&'a dyn Fn(&T) -> Value),
}

impl<T: Record> KeySource<'_, T> {
    pub fn extract(&self, item: &T) -> Value {
        match self {
            KeySource::Named(key) => resolve(item, key),
            KeySource::Accessor(f) => f(item),
        }
    }
}
