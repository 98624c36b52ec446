use std::borrow::Cow;
use std::fmt;

use crate::capture::Stringify;
use crate::parser::MAX_PRECISION;

/// A captured formatting argument.
///
/// Each call-site argument is converted into exactly one `Value` before
/// rendering starts. The variant records what kind of argument it was so
/// the renderer can apply precision only where it makes sense.
///
/// Conversion from common Rust types is provided via `From` impls:
///
/// ```rust
/// use brace_fmt::{Value, ValueKind};
///
/// let s: Value = "hello".into();
/// let n: Value = 42i32.into();
/// let b: Value = true.into();
/// let d: Value = 2.5f64.into();
/// assert_eq!(d.kind(), ValueKind::Double);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// Output of a type's own [`Stringify`] implementation.
    Custom(String),
}

/// Tag identifying the active [`Value`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Double,
    String,
    Custom,
}

impl Value {
    /// Capture a user type through its [`Stringify`] implementation.
    pub fn custom<T: Stringify + ?Sized>(value: &T) -> Self {
        Value::Custom(value.to_format_string())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Double(_) => ValueKind::Double,
            Value::String(_) => ValueKind::String,
            Value::Custom(_) => ValueKind::Custom,
        }
    }

    /// Append this value's text to `out`.
    ///
    /// - `Bool` — `"true"` or `"false"`
    /// - `Int` — plain decimal
    /// - `Float` / `Double` — shortest round-trip form, or exactly
    ///   `precision` fractional digits when one is given. Ties round to
    ///   even on the exact binary value, so `0.125` at two digits is
    ///   `"0.12"`.
    /// - `String` / `Custom` — as stored
    ///
    /// `precision` is ignored for non-float values and clamped to
    /// [`MAX_PRECISION`].
    pub fn write_to(&self, out: &mut String, precision: Option<usize>) {
        use std::fmt::Write;

        let precision = precision.map(|p| p.min(MAX_PRECISION));

        // Writing into a String cannot fail.
        let _ = match (self, precision) {
            (Value::Bool(b), _) => write!(out, "{b}"),
            (Value::Int(n), _) => write!(out, "{n}"),
            (Value::Float(x), Some(p)) => write!(out, "{x:.p$}"),
            (Value::Float(x), None) => write!(out, "{x}"),
            (Value::Double(x), Some(p)) => write!(out, "{x:.p$}"),
            (Value::Double(x), None) => write!(out, "{x}"),
            (Value::String(s), _) | (Value::Custom(s), _) => {
                out.push_str(s);
                Ok(())
            }
        };
    }

    /// Convert this value to its default output text.
    pub fn to_output_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, None);
        out
    }

    /// Convert this value to output text with an optional fixed-point
    /// precision.
    pub fn to_output_string_with(&self, precision: Option<usize>) -> String {
        let mut out = String::new();
        self.write_to(&mut out, precision);
        out
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_output_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Int(i64::from(n))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    match i64::try_from(n) {
                        Ok(n) => Value::Int(n),
                        Err(_) => Value::String(n.to_string()),
                    }
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Double(x)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::String(c.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(s: Cow<'_, str>) -> Self {
        Value::String(s.into_owned())
    }
}
