//! Error type for parsing and rendering.
//!
//! [`FormatError`] carries a structured [`FormatErrorKind`], a message,
//! an optional template [`Span`] and an optional hint, so callers can
//! both match on the failure and print a readable diagnostic.

use crate::ast::span::Span;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// The interior of a `{...}` pair does not match
    /// `[index][:.precision f]`.
    InvalidPlaceholderSyntax,
    /// A placeholder refers past the end of the argument list. Only
    /// raised when [`strict_indices`](crate::FormatOptions::strict_indices)
    /// is enabled.
    ArgumentIndexOutOfRange,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct FormatError {
    pub kind: FormatErrorKind,
    pub span: Option<Span>,
    pub message: String,
    pub hint: Option<String>,
}

impl FormatError {
    pub fn new(kind: FormatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            span: None,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn invalid_syntax(interior: &str) -> Self {
        Self::new(
            FormatErrorKind::InvalidPlaceholderSyntax,
            format!("invalid placeholder syntax: {{{interior}}}"),
        )
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::new(
            FormatErrorKind::ArgumentIndexOutOfRange,
            format!("argument index {index} out of range ({len} arguments)"),
        )
    }

    /// Format the error with template context for display
    pub fn format_with_source(&self, source: &str, entry_name: Option<&str>) -> String {
        let span = self.span.unwrap_or(Span::new(0, 0));
        let (line, col) = offset_to_line_col(source, span.start);
        let source_line = source.lines().nth(line.saturating_sub(1)).unwrap_or("");

        let location = if let Some(name) = entry_name {
            format!(" --> {name}:{line}:{col}")
        } else {
            format!(" --> {line}:{col}")
        };

        let carets = if span.is_empty() { 1 } else { span.len() };
        let pointer = " ".repeat(col.saturating_sub(1)) + &"^".repeat(carets);

        let mut output = format!(
            "Error: {}\n{location}\n  |\n{line:>3} | {source_line}\n    | {pointer}",
            self.message
        );

        if let Some(hint) = &self.hint {
            output.push_str(&format!("\n  = hint: {hint}"));
        }

        output
    }
}

fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_source_points_at_span() {
        let err = FormatError::invalid_syntax("1:2f")
            .with_span(Span::new(4, 10))
            .with_hint("use `:.` before the precision");
        let rendered = err.format_with_source("abc {1:2f} def", Some("greeting"));
        assert_eq!(
            rendered,
            "Error: invalid placeholder syntax: {1:2f}\n --> greeting:1:5\n  |\n  1 | abc {1:2f} def\n    |     ^^^^^^\n  = hint: use `:.` before the precision"
        );
    }

    #[test]
    fn test_format_with_source_without_span_marks_one_column() {
        let err = FormatError::invalid_syntax("x");
        let rendered = err.format_with_source("{x}", None);
        assert!(rendered.contains(" --> 1:1"));
        assert!(rendered.ends_with("    | ^"));
    }

    #[test]
    fn test_line_col_on_second_line() {
        assert_eq!(offset_to_line_col("ab\ncd{x}", 4), (2, 2));
    }
}
