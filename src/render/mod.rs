//! Template rendering.
//!
//! The renderer walks a parsed [`Template`] and concatenates its literal
//! text with the captured arguments each placeholder refers to. A
//! placeholder whose index is past the end of the argument list renders
//! as nothing, unless [`FormatOptions::strict_indices`] is set.

use log::debug;

use crate::ast::template::*;
use crate::ast::value::Value;
use crate::error::FormatError;

/// Configuration for parsing and rendering.
///
/// The defaults reproduce the classic behaviour: malformed placeholders
/// fail the call, out-of-range indices render as empty text.
///
/// ```rust
/// use brace_fmt::{format_with_options, FormatOptions, Value};
///
/// let opts = FormatOptions::new().lenient(true);
/// let out = format_with_options("{} {:x}", &[Value::Int(1)], opts).unwrap();
/// assert_eq!(out, "1 {:x}");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// When `true`, a placeholder with invalid syntax is copied to the
    /// output as raw text instead of failing the call. It does not
    /// consume an auto index.
    pub lenient: bool,

    /// When `true`, a placeholder index past the end of the argument list
    /// returns an [`ArgumentIndexOutOfRange`](crate::FormatErrorKind::ArgumentIndexOutOfRange)
    /// error instead of rendering as empty text.
    pub strict_indices: bool,
}

impl FormatOptions {
    /// Create a new `FormatOptions` with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable lenient placeholder parsing.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Enable or disable out-of-range index errors.
    pub fn strict_indices(mut self, strict: bool) -> Self {
        self.strict_indices = strict;
        self
    }
}

/// Render a parsed template against captured arguments with default
/// options.
pub fn render(template: &Template, args: &[Value]) -> Result<String, FormatError> {
    render_with_options(template, args, FormatOptions::default())
}

/// Render a parsed template with custom options.
pub fn render_with_options(
    template: &Template,
    args: &[Value],
    options: FormatOptions,
) -> Result<String, FormatError> {
    Renderer::new(args, options).render(template)
}

struct Renderer<'a> {
    args: &'a [Value],
    options: FormatOptions,
    output: String,
}

impl<'a> Renderer<'a> {
    fn new(args: &'a [Value], options: FormatOptions) -> Self {
        Self {
            args,
            options,
            output: String::new(),
        }
    }

    fn render(mut self, template: &Template) -> Result<String, FormatError> {
        for node in &template.nodes {
            match &node.node {
                NodeKind::Literal(text) => self.output.push_str(text),
                NodeKind::Placeholder(descriptor) => {
                    self.render_placeholder(descriptor, node)?;
                }
            }
        }
        Ok(self.output)
    }

    fn render_placeholder(&mut self, descriptor: &Descriptor, node: &Node) -> Result<(), FormatError> {
        match self.args.get(descriptor.index) {
            Some(value) => {
                value.write_to(&mut self.output, descriptor.precision);
                Ok(())
            }
            None if self.options.strict_indices => {
                Err(FormatError::index_out_of_range(descriptor.index, self.args.len())
                    .with_span(node.span))
            }
            None => {
                debug!(
                    "placeholder at {}..{} refers to argument {} but only {} given, skipped",
                    node.span.start,
                    node.span.end,
                    descriptor.index,
                    self.args.len()
                );
                Ok(())
            }
        }
    }
}
