//! Template parser.
//!
//! Parsing happens in two steps:
//!
//! - [`find_next_placeholder`] scans for the next `{...}` pair. Only the
//!   most recent `{` before a `}` opens a placeholder; earlier unmatched
//!   `{` stay in the output as literal text.
//! - [`parse_descriptor`] decodes the text between the braces using the
//!   pest grammar in `placeholder.pest`.
//!
//! [`parse`] drives both over a whole template and produces a
//! [`Template`] that can be rendered via [`crate::render`].

use log::{debug, trace};
use pest::Parser;
use pest_derive::Parser;

use crate::ast::span::{Span, Spanned};
use crate::ast::template::*;
use crate::error::FormatError;
use crate::render::FormatOptions;

/// Largest precision `core::fmt` accepts.
pub const MAX_PRECISION: usize = u16::MAX as usize;

#[derive(Parser)]
#[grammar = "parser/placeholder.pest"]
struct PlaceholderParser;

/// Parse a template string into a [`Template`] with default options.
///
/// Any invalid placeholder fails the whole parse with
/// [`InvalidPlaceholderSyntax`](crate::FormatErrorKind::InvalidPlaceholderSyntax).
pub fn parse(source: &str) -> Result<Template, FormatError> {
    parse_with_options(source, &FormatOptions::default())
}

/// Parse a template string, honouring [`FormatOptions::lenient`].
///
/// In lenient mode an invalid placeholder is kept as literal text and does
/// not consume an auto index.
pub fn parse_with_options(source: &str, options: &FormatOptions) -> Result<Template, FormatError> {
    let mut nodes = Vec::new();
    let mut auto_index = 0;
    // Start of the literal text not yet emitted.
    let mut cursor = 0;
    let mut search_from = 0;

    while let Some((open, close)) = find_next_placeholder(source, search_from) {
        search_from = close + 1;
        let span = Span::new(open, close + 1);
        let interior = &source[open + 1..close];

        match parse_descriptor(interior, auto_index) {
            Ok(descriptor) => {
                push_literal(&mut nodes, source, cursor, open);
                if !descriptor.explicit {
                    auto_index += 1;
                }
                trace!("placeholder at {}..{}: {:?}", span.start, span.end, descriptor);
                nodes.push(Spanned::new(NodeKind::Placeholder(descriptor), span));
                cursor = close + 1;
            }
            Err(err) if options.lenient => {
                debug!(
                    "keeping invalid placeholder at {}..{} as literal text: {}",
                    span.start, span.end, err.message
                );
            }
            Err(err) => return Err(err.with_span(span)),
        }
    }

    push_literal(&mut nodes, source, cursor, source.len());
    Ok(Template { nodes })
}

fn push_literal(nodes: &mut Vec<Node>, source: &str, start: usize, end: usize) {
    if start < end {
        nodes.push(Spanned::new(
            NodeKind::Literal(source[start..end].to_string()),
            Span::new(start, end),
        ));
    }
}

/// Find the next placeholder at or after `search_start`.
///
/// Returns the byte offsets of the `{` and `}` (both inclusive), or `None`
/// when no complete pair remains. A `}` seen before any `{` is ordinary
/// text, and when several `{` precede a `}` only the last one counts.
///
/// ```rust
/// use brace_fmt::find_next_placeholder;
///
/// assert_eq!(find_next_placeholder("a { {0}", 0), Some((4, 6)));
/// assert_eq!(find_next_placeholder("a } {", 0), None);
/// ```
pub fn find_next_placeholder(template: &str, search_start: usize) -> Option<(usize, usize)> {
    let mut open = None;
    for (i, &byte) in template.as_bytes().iter().enumerate().skip(search_start) {
        match byte {
            b'{' => open = Some(i),
            b'}' => {
                if let Some(open) = open {
                    return Some((open, i));
                }
            }
            _ => {}
        }
    }
    None
}

/// Decode the interior of a placeholder (the text between the braces).
///
/// The accepted form is `[index][:.precision f]`:
///
/// - an empty index takes `auto_index`, digits give an explicit index;
/// - `:.` must appear together and in that order, followed by optional
///   digits and a closing `f`;
/// - an empty precision (`{:.f}`) requests no fixed-point formatting.
///
/// An index too large for `usize` saturates, which always renders as out
/// of range. A precision above [`MAX_PRECISION`] is a syntax error. The
/// returned error's span covers `interior`.
///
/// ```rust
/// use brace_fmt::{parse_descriptor, Descriptor};
///
/// assert_eq!(parse_descriptor("", 3).unwrap(), Descriptor::auto(3));
/// assert_eq!(
///     parse_descriptor("1:.2f", 0).unwrap(),
///     Descriptor::explicit(1).with_precision(2),
/// );
/// assert!(parse_descriptor("1:2f", 0).is_err());
/// ```
pub fn parse_descriptor(interior: &str, auto_index: usize) -> Result<Descriptor, FormatError> {
    let pairs = PlaceholderParser::parse(Rule::descriptor, interior).map_err(|_| diagnose(interior))?;

    let mut descriptor = Descriptor::auto(auto_index);
    for pair in pairs.flatten() {
        match pair.as_rule() {
            Rule::index => {
                descriptor.index = pair.as_str().parse().unwrap_or(usize::MAX);
                descriptor.explicit = true;
            }
            Rule::digits => {
                let precision = pair
                    .as_str()
                    .parse::<usize>()
                    .ok()
                    .filter(|p| *p <= MAX_PRECISION)
                    .ok_or_else(|| {
                        FormatError::invalid_syntax(interior)
                            .with_span(Span::new(0, interior.len()))
                            .with_hint(format!("precision is too large (at most {MAX_PRECISION})"))
                    })?;
                descriptor.precision = Some(precision);
            }
            _ => {}
        }
    }

    Ok(descriptor)
}

/// Build an error for an interior the grammar rejected, with a hint
/// naming the first rule it breaks.
fn diagnose(interior: &str) -> FormatError {
    let err = FormatError::invalid_syntax(interior).with_span(Span::new(0, interior.len()));

    let head_end = interior.find([':', '.']).unwrap_or(interior.len());
    if !interior[..head_end].bytes().all(|b| b.is_ascii_digit()) {
        return err.with_hint("an index must be written with decimal digits only");
    }

    let hint = match (interior.find(':'), interior.find('.')) {
        (Some(_), None) => "a colon must be followed by `.` and a precision, as in `{0:.2f}`",
        (None, Some(_)) => "a precision needs a leading colon, as in `{:.2f}`",
        (Some(colon), Some(dot)) if dot < colon => {
            "a precision needs a leading colon, as in `{:.2f}`"
        }
        (Some(colon), Some(dot)) if dot != colon + 1 => {
            "nothing may appear between `:` and `.`"
        }
        (Some(_), Some(_)) if !interior.ends_with('f') => "a precision clause must end with `f`",
        (Some(_), Some(_)) => "the precision must be written with decimal digits only",
        (None, None) => "an index must be written with decimal digits only",
    };
    err.with_hint(hint)
}
