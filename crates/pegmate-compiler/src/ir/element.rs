//! Rule body elements.

use std::collections::HashSet;

use pegmate_core::escape::escape_string;
use rowan::TextRange;

use super::Grammar;

/// Semantic annotation wrapping an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Match, but keep nothing in the tree.
    Drop,
    /// Collapse everything matched into text, optionally decoding escapes.
    IsTerminal { unescape: bool },
    /// Expand the definition at every reference site instead of calling it.
    TreatInline,
    /// Replace failure labels at the start of the body with the error name.
    PromoteErrorName,
    /// Replace every failure label inside the body with the error name.
    UseNameAsError,
}

impl Marker {
    pub fn keyword(self) -> &'static str {
        match self {
            Marker::Drop => "@drop",
            Marker::IsTerminal { unescape: true } => "@terminal",
            Marker::IsTerminal { unescape: false } => "@raw",
            Marker::TreatInline => "@inline",
            Marker::PromoteErrorName => "@promote",
            Marker::UseNameAsError => "@error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Literal text, escapes already decoded.
    Text(String),
    Regex {
        pattern: String,
        repeat: u32,
    },
    Number(String),
    Boolean(bool),
    /// Named reference, resolved lazily through the grammar.
    Reference(String),
    Sequence(Box<Element>, Box<Element>),
    /// Ordered choice: the left side wins when both match.
    Choice(Box<Element>, Box<Element>),
    Optional(Box<Element>),
    ZeroOrMore(Box<Element>),
    OneOrMore(Box<Element>),
    Not(Box<Element>),
    Marked {
        marker: Marker,
        child: Box<Element>,
    },
}

impl Element {
    pub fn new(kind: ElementKind, span: TextRange) -> Self {
        Self { kind, span }
    }

    pub fn describe(&self) -> &'static str {
        match &self.kind {
            ElementKind::Text(_) => "text",
            ElementKind::Regex { .. } => "regex",
            ElementKind::Number(_) => "number",
            ElementKind::Boolean(_) => "boolean",
            ElementKind::Reference(_) => "reference",
            ElementKind::Sequence(..) => "sequence",
            ElementKind::Choice(..) => "choice",
            ElementKind::Optional(_) => "optional",
            ElementKind::ZeroOrMore(_) => "zero-or-more",
            ElementKind::OneOrMore(_) => "one-or-more",
            ElementKind::Not(_) => "negation",
            ElementKind::Marked { .. } => "marked element",
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Element> {
        match &self.kind {
            ElementKind::Sequence(l, r) | ElementKind::Choice(l, r) => vec![l, r],
            ElementKind::Optional(e)
            | ElementKind::ZeroOrMore(e)
            | ElementKind::OneOrMore(e)
            | ElementKind::Not(e) => vec![e],
            ElementKind::Marked { child, .. } => vec![child],
            _ => Vec::new(),
        }
    }

    pub fn as_reference(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Reference(name) => Some(name),
            _ => None,
        }
    }

    /// Strip the markers wrapping this element, outermost first.
    pub fn peel_markers(&self) -> (Vec<Marker>, &Element) {
        let mut markers = Vec::new();
        let mut current = self;
        while let ElementKind::Marked { marker, child } = &current.kind {
            markers.push(*marker);
            current = child;
        }
        (markers, current)
    }

    /// Whether a successful match can produce different text on different
    /// inputs.
    ///
    /// Fixed literals, negations and dropped elements never do. A choice or
    /// repetition always does, since its text depends on the branch taken or
    /// the number of iterations. References
    /// are followed through the grammar; undefined ones and cycles count as
    /// fixed.
    pub fn matches_variable_text(&self, grammar: &Grammar) -> bool {
        let mut visiting = HashSet::new();
        self.variable_text_inner(grammar, &mut visiting)
    }

    fn variable_text_inner<'g>(&'g self, grammar: &'g Grammar, visiting: &mut HashSet<&'g str>) -> bool {
        match &self.kind {
            ElementKind::Text(_)
            | ElementKind::Number(_)
            | ElementKind::Boolean(_)
            | ElementKind::Not(_) => false,
            ElementKind::Regex { .. } => true,
            ElementKind::Marked {
                marker: Marker::Drop,
                ..
            } => false,
            ElementKind::Reference(name) => {
                let Some(def) = grammar.find(name) else {
                    return false;
                };
                if !visiting.insert(def.name.as_str()) {
                    return false;
                }
                let variable = def.body.variable_text_inner(grammar, visiting);
                visiting.remove(def.name.as_str());
                variable
            }
            ElementKind::Sequence(l, r) => {
                l.variable_text_inner(grammar, visiting) || r.variable_text_inner(grammar, visiting)
            }
            ElementKind::Choice(..)
            | ElementKind::Optional(_)
            | ElementKind::ZeroOrMore(_)
            | ElementKind::OneOrMore(_) => true,
            ElementKind::Marked { child, .. } => child.variable_text_inner(grammar, visiting),
        }
    }
}

/// Compact s-expression form, e.g. `(seq "a" (opt /[0-9]+/))`.
impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ElementKind::Text(s) => write!(f, "\"{}\"", escape_string(s)),
            ElementKind::Regex { pattern, repeat: 1 } => write!(f, "/{pattern}/"),
            ElementKind::Regex { pattern, repeat } => write!(f, "/{pattern}/{{{repeat}}}"),
            ElementKind::Number(n) => write!(f, "{n}"),
            ElementKind::Boolean(b) => write!(f, "{b}"),
            ElementKind::Reference(name) => write!(f, "{name}"),
            ElementKind::Sequence(l, r) => write!(f, "(seq {l} {r})"),
            ElementKind::Choice(l, r) => write!(f, "(choice {l} {r})"),
            ElementKind::Optional(e) => write!(f, "(opt {e})"),
            ElementKind::ZeroOrMore(e) => write!(f, "(star {e})"),
            ElementKind::OneOrMore(e) => write!(f, "(plus {e})"),
            ElementKind::Not(e) => write!(f, "(not {e})"),
            ElementKind::Marked { marker, child } => write!(f, "({} {child})", marker.keyword()),
        }
    }
}
