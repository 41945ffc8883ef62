//! Parse tree produced by a successful parse.

use std::fmt::Write as _;

use pegmate_core::escape::escape_string;

/// One node of the parse tree.
///
/// Rule nodes carry the rule name; leaves (matched literals and patterns)
/// carry `rule: None` and their matched text. `text` on a rule node holds
/// whatever collapsed terminals contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseNode {
    pub rule: Option<String>,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub children: Vec<ParseNode>,
}

impl ParseNode {
    pub fn rule(name: impl Into<String>, start: usize) -> Self {
        Self {
            rule: Some(name.into()),
            start,
            end: start,
            ..Self::default()
        }
    }

    pub fn leaf(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            rule: None,
            text: text.into(),
            start,
            end,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.rule.is_none()
    }

    /// Move `other`'s text and children into `self`, dropping the wrapper.
    pub fn splice(&mut self, other: ParseNode) {
        self.text.push_str(&other.text);
        self.children.extend(other.children);
    }

    /// The input slice this node spans.
    pub fn matched<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }

    /// Pre-order iterator over rule nodes named `name`.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ParseNode> + 'a {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                stack.extend(node.children.iter().rev());
                if node.rule.as_deref() == Some(name) {
                    return Some(node);
                }
            }
            None
        })
    }

    /// Indented outline for debugging and snapshot tests.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, indent: usize) {
        for _ in 0..indent {
            out.push_str("  ");
        }
        match &self.rule {
            Some(name) => {
                write!(out, "{name} {}..{}", self.start, self.end).unwrap();
                if !self.text.is_empty() {
                    write!(out, " = \"{}\"", escape_string(&self.text)).unwrap();
                }
            }
            None => {
                write!(
                    out,
                    "\"{}\" {}..{}",
                    escape_string(&self.text),
                    self.start,
                    self.end
                )
                .unwrap();
            }
        }
        out.push('\n');
        for child in &self.children {
            child.dump_into(out, indent + 1);
        }
    }
}
