//! Values that can become text.

use std::fmt;

use serde_json::Value;

use crate::{Error, Text};

/// The closed set of inputs a [`Text`] can be built from.
///
/// Conversion rules:
///
/// | Variant | Text |
/// |---------|------|
/// | `Null` | `""` |
/// | `Bool(false)` | `""` |
/// | `Bool(true)` | `"1"` |
/// | `Int`, `Float` | decimal |
/// | `Str`, `Object` | as is |
///
/// ```rust
/// use unitext::{Stringable, Text};
///
/// assert_eq!(Text::new(true).to_string(), "1");
/// assert_eq!(Text::new(false).to_string(), "");
/// assert_eq!(Text::new(2.5).to_string(), "2.5");
/// assert_eq!(Text::new(()).to_string(), "");
///
/// let addr = std::net::Ipv4Addr::LOCALHOST;
/// assert_eq!(Text::new(Stringable::object(&addr)).to_string(), "127.0.0.1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Stringable {
    /// Absent value.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A string.
    Str(String),
    /// The rendering of an object with a `Display` implementation.
    Object(String),
}

impl Stringable {
    /// Capture an object through its `Display` implementation.
    pub fn object<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Self::Object(value.to_string())
    }

    /// Convert to a string.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Null | Self::Bool(false) => String::new(),
            Self::Bool(true) => "1".to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(x) => x.to_string(),
            Self::Str(s) | Self::Object(s) => s,
        }
    }
}

impl From<()> for Stringable {
    fn from((): ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Stringable>> From<Option<T>> for Stringable {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<bool> for Stringable {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! int_stringable {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Stringable {
                fn from(value: $t) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

int_stringable!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Stringable {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Str(value.to_string()), Self::Int)
    }
}

impl From<u64> for Stringable {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Str(value.to_string()), Self::Int)
    }
}

impl From<f32> for Stringable {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Stringable {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<char> for Stringable {
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<&str> for Stringable {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Stringable {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Stringable {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<&Text> for Stringable {
    fn from(value: &Text) -> Self {
        Self::Object(value.to_string())
    }
}

impl From<Text> for Stringable {
    fn from(value: Text) -> Self {
        Self::Object(value.to_string())
    }
}

/// Dynamic input: arrays and objects have no string form.
impl TryFrom<&Value> for Stringable {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self, Error> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Number(n) => Ok(n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_u64().map(|u| Self::Str(u.to_string())))
                .unwrap_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)))),
            Value::String(s) => Ok(Self::Str(s.clone())),
            Value::Array(_) => Err(Error::InvalidArgument(
                "an array cannot be converted to text".to_string(),
            )),
            Value::Object(_) => Err(Error::InvalidArgument(
                "an object without a string form cannot be converted to text".to_string(),
            )),
        }
    }
}

impl TryFrom<Value> for Stringable {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Error> {
        Self::try_from(&value)
    }
}
