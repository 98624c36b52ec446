//! Argument capture: turning call-site arguments into [`Value`]s.
//!
//! Three kinds of argument are recognised, in priority order:
//!
//! 1. Types with a direct [`Value`] mapping implement [`Capture`]: `bool`,
//!    the integer types, `f32`, `f64`, `char` and the string types.
//! 2. User types opt in to formatting by implementing [`Stringify`]. Their
//!    output is captured as [`Value::Custom`].
//! 3. Anything else is captured as the [`UNFORMATTABLE`] marker string.
//!
//! The [`args!`](crate::args) and [`brace_format!`](crate::brace_format)
//! macros pick the first rule that applies for each argument at compile
//! time, using method-resolution priority over [`Probe`]. A method that is
//! merely *named* like the capability (for example an inherent
//! `to_format_string(&self) -> i32`) does not count: only a `Stringify`
//! implementation, with its exact signature, does.
//!
//! ```rust
//! use brace_fmt::{args, Stringify, Value};
//!
//! struct Point { x: i32, y: i32 }
//!
//! impl Stringify for Point {
//!     fn to_format_string(&self) -> String {
//!         format!("({}, {})", self.x, self.y)
//!     }
//! }
//!
//! struct Opaque;
//!
//! let values = args!(1, "two", Point { x: 3, y: 4 }, Opaque);
//! assert_eq!(values, vec![
//!     Value::Int(1),
//!     Value::String("two".into()),
//!     Value::Custom("(3, 4)".into()),
//!     Value::String("?".into()),
//! ]);
//! ```

use std::borrow::Cow;

use crate::ast::value::Value;

/// Text stored for arguments that have no way to be formatted.
pub const UNFORMATTABLE: &str = "?";

/// The formatting capability for user-defined types.
///
/// Implement this to control how a type renders when passed as an
/// argument. The result is stored unmodified as [`Value::Custom`].
pub trait Stringify {
    fn to_format_string(&self) -> String;
}

impl<T: Stringify + ?Sized> Stringify for &T {
    fn to_format_string(&self) -> String {
        (**self).to_format_string()
    }
}

impl<T: Stringify + ?Sized> Stringify for Box<T> {
    fn to_format_string(&self) -> String {
        (**self).to_format_string()
    }
}

/// Types with a direct mapping to a [`Value`] variant.
pub trait Capture {
    fn capture(&self) -> Value;
}

/// Capture a single argument whose type has a direct [`Value`] mapping.
///
/// For user types use [`Value::custom`], or let the [`args!`](crate::args)
/// macro choose the rule.
pub fn capture<T: Capture + ?Sized>(value: &T) -> Value {
    value.capture()
}

impl<T: Capture + ?Sized> Capture for &T {
    fn capture(&self) -> Value {
        (**self).capture()
    }
}

impl Capture for Value {
    fn capture(&self) -> Value {
        self.clone()
    }
}

impl Capture for str {
    fn capture(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl Capture for String {
    fn capture(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Capture for Cow<'_, str> {
    fn capture(&self) -> Value {
        Value::String(self.as_ref().to_owned())
    }
}

macro_rules! impl_capture_copy {
    ($($ty:ty),*) => {
        $(
            impl Capture for $ty {
                fn capture(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_capture_copy!(bool, char, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

// ── Compile-time dispatch ───────────────────────────────────────────────
//
// `(&&&Probe(&arg)).capture_value()` resolves against the impls below in
// autoderef order: `&&Probe` first, then `&Probe`, then `Probe`. Each impl
// only applies when its bound holds, so the first matching rule wins.

/// Borrowed argument wrapper used by [`args!`](crate::args).
#[doc(hidden)]
pub struct Probe<'a, T: ?Sized>(pub &'a T);

#[doc(hidden)]
pub trait CaptureKnown {
    fn capture_value(&self) -> Value;
}

impl<T: Capture + ?Sized> CaptureKnown for &&Probe<'_, T> {
    fn capture_value(&self) -> Value {
        T::capture(self.0)
    }
}

#[doc(hidden)]
pub trait CaptureStringify {
    fn capture_value(&self) -> Value;
}

impl<T: Stringify + ?Sized> CaptureStringify for &Probe<'_, T> {
    fn capture_value(&self) -> Value {
        Value::custom(self.0)
    }
}

#[doc(hidden)]
pub trait CaptureFallback {
    fn capture_value(&self) -> Value;
}

impl<T: ?Sized> CaptureFallback for Probe<'_, T> {
    fn capture_value(&self) -> Value {
        log::debug!(
            "argument of type `{}` implements neither Capture nor Stringify, rendering as {UNFORMATTABLE:?}",
            std::any::type_name::<T>()
        );
        Value::String(UNFORMATTABLE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Track {
        x: f32,
        y: f32,
        motion: &'static str,
    }

    impl Stringify for Track {
        fn to_format_string(&self) -> String {
            format!("x={:.6},y={:.6},motion={}", self.x, self.y, self.motion)
        }
    }

    struct WrongReturn;

    impl WrongReturn {
        #[allow(dead_code)]
        fn to_format_string(&self) -> i32 {
            1
        }
    }

    struct Plain;

    #[test]
    fn test_capture_known_types() {
        assert_eq!(capture(&true), Value::Bool(true));
        assert_eq!(capture(&-5i32), Value::Int(-5));
        assert_eq!(capture(&1.5f32), Value::Float(1.5));
        assert_eq!(capture(&1.5f64), Value::Double(1.5));
        assert_eq!(capture("s"), Value::String("s".into()));
        assert_eq!(capture(&String::from("s")), Value::String("s".into()));
        assert_eq!(capture(&&&7u8), Value::Int(7));
    }

    #[test]
    fn test_args_dispatch() {
        let track = Track {
            x: 10.0,
            y: 1.0,
            motion: "Moving",
        };
        let values = crate::args!(1, 2.0, WrongReturn, track, Plain);
        assert_eq!(
            values,
            vec![
                Value::Int(1),
                Value::Double(2.0),
                Value::String("?".into()),
                Value::Custom("x=10.000000,y=1.000000,motion=Moving".into()),
                Value::String("?".into()),
            ]
        );
    }

    #[test]
    fn test_args_by_reference() {
        let name = String::from("Alice");
        let values = crate::args!(&name, name.as_str(), 'c');
        assert_eq!(values[0], Value::String("Alice".into()));
        assert_eq!(values[1], Value::String("Alice".into()));
        assert_eq!(values[2], Value::String("c".into()));
        // Still usable: arguments are borrowed.
        assert_eq!(name, "Alice");
    }

    #[test]
    fn test_known_type_wins_over_stringify() {
        struct Both;
        impl Capture for Both {
            fn capture(&self) -> Value {
                Value::Int(9)
            }
        }
        impl Stringify for Both {
            fn to_format_string(&self) -> String {
                "nine".into()
            }
        }
        assert_eq!(crate::args!(Both), vec![Value::Int(9)]);
    }

    #[test]
    fn test_empty_args() {
        assert!(crate::args!().is_empty());
    }
}
