use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Reserved key for form-level messages that belong to no single field.
pub const GLOBAL_KEY: &str = "_global";

#[derive(Clone)]
enum Repr {
    Static(&'static str),
    Shared(Arc<str>),
}

/// Canonical string key of a field.
///
/// Every caller key type (string, integer, symbol descriptor) is projected to
/// one of these before it touches a mapping, so keys compare by their text
/// regardless of where they came from.
#[derive(Clone)]
pub struct FieldKey(Repr);

impl FieldKey {
    pub const fn new(value: &'static str) -> Self {
        Self(Repr::Static(value))
    }

    pub const fn global() -> Self {
        Self::new(GLOBAL_KEY)
    }

    pub fn as_str(&self) -> &str {
        match &self.0 {
            Repr::Static(value) => value,
            Repr::Shared(value) => value,
        }
    }

    pub fn is_global(&self) -> bool {
        self.as_str() == GLOBAL_KEY
    }
}

impl PartialEq for FieldKey {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for FieldKey {}

impl PartialOrd for FieldKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for FieldKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Borrow<str> for FieldKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for FieldKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Debug for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<str> for FieldKey {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for FieldKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// A symbolic field identifier. Projects to `Symbol(<description>)`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }
}

/// Safe-name projection of a caller key into a [`FieldKey`].
pub trait IntoFieldKey {
    fn into_field_key(self) -> FieldKey;
}

impl IntoFieldKey for FieldKey {
    fn into_field_key(self) -> FieldKey {
        self
    }
}

impl IntoFieldKey for &FieldKey {
    fn into_field_key(self) -> FieldKey {
        self.clone()
    }
}

/// Borrowed names are copied into a shared key; use [`FieldKey::new`] for
/// literals that should stay allocation-free.
impl IntoFieldKey for &str {
    fn into_field_key(self) -> FieldKey {
        FieldKey(Repr::Shared(self.into()))
    }
}

impl IntoFieldKey for String {
    fn into_field_key(self) -> FieldKey {
        FieldKey(Repr::Shared(self.into()))
    }
}

impl IntoFieldKey for &String {
    fn into_field_key(self) -> FieldKey {
        FieldKey(Repr::Shared(self.as_str().into()))
    }
}

impl IntoFieldKey for Arc<str> {
    fn into_field_key(self) -> FieldKey {
        FieldKey(Repr::Shared(self))
    }
}

impl IntoFieldKey for Symbol {
    fn into_field_key(self) -> FieldKey {
        format!("Symbol({})", self.0).into_field_key()
    }
}

macro_rules! integer_field_keys {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoFieldKey for $ty {
                fn into_field_key(self) -> FieldKey {
                    self.to_string().into_field_key()
                }
            }
        )*
    };
}

integer_field_keys!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

macro_rules! from_field_key_sources {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for FieldKey {
                fn from(value: $ty) -> Self {
                    value.into_field_key()
                }
            }
        )*
    };
}

from_field_key_sources!(&str, String, &String, Arc<str>, Symbol, u32, u64, usize, i32, i64);

#[cfg(feature = "serde")]
impl serde::Serialize for FieldKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FieldKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(value.into_field_key())
    }
}
