//! Parsed template types for brace-fmt.
//!
//! - [`template`]: the [`Template`] node list produced by the parser.
//! - [`value`]: the [`Value`] sum type that every argument is captured
//!   into before rendering.

pub mod span;
pub mod template;
pub mod value;

// Convenience re-exports
pub use span::{Span, Spanned};
pub use template::*;
pub use value::{Value, ValueKind};
