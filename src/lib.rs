//! # brace-fmt
//!
//! String formatting with `{}` placeholders and typed argument capture.
//! A template contains placeholders of the form
//! `{` [index] [`:.` precision `f`] `}`; each argument is captured into a
//! [`Value`] and substituted where a placeholder refers to it.
//!
//! - `{}` takes the next auto index. Auto indices count only `{}`-style
//!   placeholders, so explicit ones never shift them.
//! - `{2}` refers to the third argument.
//! - `{:.3f}` / `{1:.3f}` render a float with exactly three fractional
//!   digits.
//!
//! ## Quick start
//!
//! ```rust
//! use brace_fmt::brace_format;
//!
//! let out = brace_format!("{1} {} {0}", "x", "y").unwrap();
//! assert_eq!(out, "y x x");
//!
//! let pi = brace_format!("pi is about {:.3f}", 3.14159).unwrap();
//! assert_eq!(pi, "pi is about 3.142");
//! ```
//!
//! ## User types
//!
//! Implement [`Stringify`] to make a type formattable. Types without it
//! still format, as `?`:
//!
//! ```rust
//! use brace_fmt::{brace_format, Stringify};
//!
//! struct Track { motion: &'static str }
//!
//! impl Stringify for Track {
//!     fn to_format_string(&self) -> String {
//!         format!("motion={}", self.motion)
//!     }
//! }
//!
//! struct Opaque;
//!
//! let out = brace_format!("{} {}", Track { motion: "Moving" }, Opaque).unwrap();
//! assert_eq!(out, "motion=Moving ?");
//! ```
//!
//! ## Compiled templates
//!
//! For repeated rendering, parse once with [`CompiledTemplate::compile`]:
//!
//! ```rust
//! use brace_fmt::{CompiledTemplate, Value};
//!
//! let template = CompiledTemplate::compile("HP: {}").unwrap();
//! assert_eq!(template.render(&[Value::Int(100)]).unwrap(), "HP: 100");
//! assert_eq!(template.render(&[Value::Int(75)]).unwrap(), "HP: 75");
//! ```
//!
//! ## Errors
//!
//! A malformed placeholder fails the whole call:
//!
//! ```rust
//! use brace_fmt::{brace_format, FormatErrorKind};
//!
//! let err = brace_format!("{1:2f}", 1.0, 2.0).unwrap_err();
//! assert_eq!(err.kind, FormatErrorKind::InvalidPlaceholderSyntax);
//! ```

pub mod ast;
pub mod capture;
pub mod error;
mod parser;
pub mod render;

pub use ast::span::{Span, Spanned};
pub use ast::template::{Descriptor, Node, NodeKind, Placeholder, Template};
pub use ast::value::{Value, ValueKind};
pub use capture::{Capture, Stringify, UNFORMATTABLE, capture};
pub use error::{FormatError, FormatErrorKind};
pub use parser::{MAX_PRECISION, find_next_placeholder, parse, parse_descriptor, parse_with_options};
pub use render::{FormatOptions, render, render_with_options};

/// Parse a template and render it against `args` in a single step.
///
/// For repeated rendering of the same template, prefer
/// [`CompiledTemplate`] to avoid re-parsing.
pub fn format(template: &str, args: &[Value]) -> Result<String, FormatError> {
    format_with_options(template, args, FormatOptions::default())
}

/// Parse and render with custom options.
pub fn format_with_options(
    template: &str,
    args: &[Value],
    options: FormatOptions,
) -> Result<String, FormatError> {
    let parsed = parser::parse_with_options(template, &options)?;
    render_with_options(&parsed, args, options)
}

/// Rendering entry point for `format_checked!` and `#[derive(Stringify)]`.
///
/// Both macros parse `template` during expansion and reject it there if it
/// is malformed. With default options the renderer only fails on syntax,
/// so an error here means the expansion-time check and the runtime parser
/// disagree.
#[doc(hidden)]
pub fn __render_checked(template: &str, args: &[Value]) -> String {
    match format(template, args) {
        Ok(output) => output,
        Err(err) => unreachable!("template {template:?} passed the expansion-time check: {err}"),
    }
}

/// A parsed template that can be rendered many times without re-parsing.
///
/// ```rust
/// use brace_fmt::{CompiledTemplate, Value};
///
/// let template = CompiledTemplate::compile("{0} has {1:.1f} HP").unwrap();
/// assert_eq!(template.ast().max_index(), Some(1));
///
/// let out = template.render(&[Value::from("Alice"), Value::Double(99.95)]).unwrap();
/// assert_eq!(out, "Alice has 100.0 HP");
/// ```
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    template: Template,
    options: FormatOptions,
}

impl CompiledTemplate {
    /// Parse source text into a compiled template.
    pub fn compile(source: &str) -> Result<Self, FormatError> {
        Self::compile_with_options(source, FormatOptions::default())
    }

    /// Parse source text with custom options. The options are kept and
    /// used for every later [`render`](Self::render).
    pub fn compile_with_options(source: &str, options: FormatOptions) -> Result<Self, FormatError> {
        let template = parser::parse_with_options(source, &options)?;
        Ok(Self { template, options })
    }

    /// Render this template against the given arguments.
    pub fn render(&self, args: &[Value]) -> Result<String, FormatError> {
        render_with_options(&self.template, args, self.options)
    }

    /// Iterate over the placeholders in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.template.placeholders()
    }

    /// Access the underlying parsed template.
    pub fn ast(&self) -> &Template {
        &self.template
    }
}

/// Capture a list of arguments into a `Vec<Value>`.
///
/// Each argument is borrowed and converted with the first rule that
/// applies to its type: a direct [`Capture`] mapping, then
/// [`Stringify`], then the [`UNFORMATTABLE`] marker. The choice is made at
/// compile time.
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::capture::{
            CaptureFallback as _, CaptureKnown as _, CaptureStringify as _,
        };
        let values: ::std::vec::Vec<$crate::Value> = ::std::vec![
            $((&&&$crate::capture::Probe(&$arg)).capture_value()),*
        ];
        values
    }};
}

/// Format a template with arguments of any type.
///
/// Expands to [`format`] over [`args!`]; returns
/// `Result<String, FormatError>`.
///
/// ```rust
/// use brace_fmt::brace_format;
///
/// assert_eq!(brace_format!("{} + {} = {}", 1, 2, 3).unwrap(), "1 + 2 = 3");
/// assert_eq!(brace_format!("no placeholders").unwrap(), "no placeholders");
/// ```
#[macro_export]
macro_rules! brace_format {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::format($template, &$crate::args!($($arg),*))
    };
}
