use super::span::Spanned;

/// A parsed template: literal text interleaved with placeholders, in
/// source order. Rendering concatenates the nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub nodes: Vec<Node>,
}

pub type Node = Spanned<NodeKind>;

/// A placeholder descriptor together with the span of its `{...}` pair.
pub type Placeholder = Spanned<Descriptor>;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Text copied to the output verbatim. Stray braces that do not
    /// form a placeholder end up here, as do invalid placeholders in
    /// lenient mode.
    Literal(String),

    /// A `{...}` region to be replaced by an argument.
    Placeholder(Descriptor),
}

/// The decoded interior of a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Position in the argument sequence.
    pub index: usize,
    /// `true` when the index was written in the template, `false` when it
    /// came from the auto counter.
    pub explicit: bool,
    /// Fixed-point digits requested with `:.Nf`.
    pub precision: Option<usize>,
}

impl Descriptor {
    pub fn auto(index: usize) -> Self {
        Self {
            index,
            explicit: false,
            precision: None,
        }
    }

    pub fn explicit(index: usize) -> Self {
        Self {
            index,
            explicit: true,
            precision: None,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn has_precision(&self) -> bool {
        self.precision.is_some()
    }
}

impl Template {
    /// Iterate over the placeholders in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.nodes.iter().filter_map(|n| match &n.node {
            NodeKind::Placeholder(d) => Some(Spanned::new(*d, n.span)),
            NodeKind::Literal(_) => None,
        })
    }

    /// Highest argument index any placeholder refers to.
    pub fn max_index(&self) -> Option<usize> {
        self.placeholders().map(|p| p.node.index).max()
    }

    pub fn is_literal(&self) -> bool {
        self.placeholders().next().is_none()
    }
}
