//! Shift-reduce construction of the grammar IR from the contract tree.
//!
//! The tree is walked once and reduced in post-order. Entering a node opens
//! a stack scope and tokens shift their value onto the stack. Leaving a node
//! reduces whatever its children left in that scope into a single item,
//! closes the scope and pushes the result for the parent.

mod error;
mod item;

use indexmap::IndexMap;
use pegmate_core::{Describe, ScopedStack, StackError, StackKind, escape};
use rowan::{NodeOrToken, TextRange, WalkEvent};

pub use error::ReduceError;

use crate::ir::{Attribute, DefKind, Definition, Element, ElementKind, Grammar, Marker, Value};
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};
use item::{
    MarkerItem, Operator, OperatorItem, PropertyItem, RepeatCountItem, StackItem, TopLevel,
};

/// Reduce a contract tree rooted at a `Root` node into a [`Grammar`].
pub fn reduce(root: &SyntaxNode) -> Result<Grammar, ReduceError> {
    if root.kind() != SyntaxKind::Root {
        return Err(ReduceError::UnexpectedKind {
            kind: root.kind(),
            span: root.text_range(),
        });
    }

    let mut reducer = Reducer::default();
    for event in root.preorder_with_tokens() {
        match event {
            WalkEvent::Enter(NodeOrToken::Node(_)) => reducer.stack.enter_scope(),
            WalkEvent::Enter(NodeOrToken::Token(token)) => reducer.shift(&token)?,
            WalkEvent::Leave(NodeOrToken::Node(node)) => reducer.leave(&node)?,
            WalkEvent::Leave(NodeOrToken::Token(_)) => {}
        }
    }

    let grammar = reducer.grammar.unwrap_or_default();
    log::debug!(
        "reduced {} definitions, {} options",
        grammar.len(),
        grammar.options().count()
    );
    Ok(grammar)
}

#[derive(Default)]
struct Reducer {
    stack: ScopedStack<StackItem>,
    grammar: Option<Grammar>,
}

impl Reducer {
    fn shift(&mut self, token: &SyntaxToken) -> Result<(), ReduceError> {
        let span = token.text_range();
        let text = token.text();
        let item = match token.kind() {
            SyntaxKind::Ident => element(ElementKind::Reference(text.to_owned()), span),
            SyntaxKind::String => element(ElementKind::Text(string_value(text)), span),
            SyntaxKind::Regex => element(
                ElementKind::Regex {
                    pattern: regex_value(text),
                    repeat: 1,
                },
                span,
            ),
            SyntaxKind::Number => element(ElementKind::Number(text.to_owned()), span),
            SyntaxKind::True => element(ElementKind::Boolean(true), span),
            SyntaxKind::False => element(ElementKind::Boolean(false), span),
            SyntaxKind::KwDrop => StackItem::Marker(Marker::Drop, span),
            SyntaxKind::KwTerminal => StackItem::Marker(Marker::IsTerminal { unescape: true }, span),
            SyntaxKind::KwRawTerminal => {
                StackItem::Marker(Marker::IsTerminal { unescape: false }, span)
            }
            SyntaxKind::KwInline => StackItem::Marker(Marker::TreatInline, span),
            SyntaxKind::KwPromoteError => StackItem::Marker(Marker::PromoteErrorName, span),
            SyntaxKind::KwNameAsError => StackItem::Marker(Marker::UseNameAsError, span),
            SyntaxKind::Question => StackItem::Operator(Operator::Optional, span),
            SyntaxKind::Star => StackItem::Operator(Operator::ZeroOrMore, span),
            SyntaxKind::Plus => StackItem::Operator(Operator::OneOrMore, span),
            kind if kind.is_trivia() || kind.is_punctuation() => return Ok(()),
            kind => return Err(ReduceError::UnexpectedKind { kind, span }),
        };
        self.stack.push(item);
        Ok(())
    }

    fn leave(&mut self, node: &SyntaxNode) -> Result<(), ReduceError> {
        let kind = node.kind();
        let span = node.text_range();
        log::trace!("reduce {kind:?} at {span:?}");

        if kind == SyntaxKind::Root {
            return self.reduce_root(span);
        }

        let result = match kind {
            SyntaxKind::Group | SyntaxKind::Marker => None,
            SyntaxKind::Sequence | SyntaxKind::Choice => Some(self.reduce_fold(kind, span)?),
            SyntaxKind::Suffix => Some(self.reduce_suffix(span)?),
            SyntaxKind::Not => {
                let child = self.pop::<Element>(kind, span)?;
                Some(element(ElementKind::Not(Box::new(child)), span))
            }
            SyntaxKind::Marked => {
                let child = self.pop::<Element>(kind, span)?;
                Some(StackItem::Element(self.thread_markers(child)))
            }
            SyntaxKind::RegexTerm => Some(self.reduce_regex_term(span)?),
            SyntaxKind::RepeatCount => Some(self.reduce_repeat_count(span)?),
            SyntaxKind::Property => Some(StackItem::Property(self.reduce_attribute(kind, span)?)),
            SyntaxKind::OptionDecl => Some(StackItem::Option(self.reduce_attribute(kind, span)?)),
            SyntaxKind::Definition => Some(self.reduce_definition(DefKind::Rule, span)?),
            SyntaxKind::TmDefinition => Some(self.reduce_definition(DefKind::Highlight, span)?),
            _ => return Err(ReduceError::UnexpectedKind { kind, span }),
        };

        let leftovers = self.exit(kind, span)?;
        match result {
            Some(item) => {
                if let Some(extra) = leftovers.first() {
                    return Err(ReduceError::Leftover {
                        kind,
                        found: extra.describe(),
                        span,
                    });
                }
                self.stack.push(item);
            }
            // Pass-through nodes hand their children's items to the parent.
            None => {
                for item in leftovers {
                    self.stack.push(item);
                }
            }
        }
        Ok(())
    }

    fn pop<K: StackKind<StackItem>>(
        &mut self,
        kind: SyntaxKind,
        span: TextRange,
    ) -> Result<K, ReduceError> {
        self.stack
            .pop::<K>()
            .map_err(|source| ReduceError::Stack { source, kind, span })
    }

    fn exit(&mut self, kind: SyntaxKind, span: TextRange) -> Result<Vec<StackItem>, ReduceError> {
        self.stack
            .exit_scope()
            .map_err(|source| ReduceError::Stack { source, kind, span })
    }

    /// `e0 e1 .. en` becomes `Op(e0, Op(e1, .. en))`.
    fn reduce_fold(&mut self, kind: SyntaxKind, span: TextRange) -> Result<StackItem, ReduceError> {
        let mut elements = self.stack.pop_run::<Element>();
        let Some(mut acc) = elements.pop() else {
            return Err(ReduceError::EmptyOperator { kind, span });
        };
        while let Some(left) = elements.pop() {
            let span = left.span.cover(acc.span);
            let (l, r) = (Box::new(left), Box::new(acc));
            let folded = if kind == SyntaxKind::Sequence {
                ElementKind::Sequence(l, r)
            } else {
                ElementKind::Choice(l, r)
            };
            acc = Element::new(folded, span);
        }
        Ok(StackItem::Element(acc))
    }

    fn reduce_suffix(&mut self, span: TextRange) -> Result<StackItem, ReduceError> {
        let operator = self.stack.try_pop::<OperatorItem>();
        let (child, operator) = match (self.stack.pop::<Element>(), operator) {
            (Ok(child), operator) => (child, operator),
            (Err(StackError::Empty { .. }), Some(OperatorItem(op, op_span))) => {
                return Err(ReduceError::OrphanOperator {
                    operator: op.symbol(),
                    span: op_span,
                });
            }
            (Err(source), _) => {
                return Err(ReduceError::Stack {
                    source,
                    kind: SyntaxKind::Suffix,
                    span,
                });
            }
        };
        let Some(OperatorItem(op, _)) = operator else {
            return Ok(StackItem::Element(child));
        };
        let child = Box::new(child);
        let kind = match op {
            Operator::Optional => ElementKind::Optional(child),
            Operator::ZeroOrMore => ElementKind::ZeroOrMore(child),
            Operator::OneOrMore => ElementKind::OneOrMore(child),
        };
        Ok(element(kind, span))
    }

    fn reduce_regex_term(&mut self, span: TextRange) -> Result<StackItem, ReduceError> {
        let count = self.stack.try_pop::<RepeatCountItem>();
        let mut regex = self.pop::<Element>(SyntaxKind::RegexTerm, span)?;
        let ElementKind::Regex { repeat, .. } = &mut regex.kind else {
            return Err(ReduceError::ExpectedRegex {
                found: regex.describe(),
                span: regex.span,
            });
        };
        if let Some(RepeatCountItem(n, _)) = count {
            *repeat = n;
        }
        regex.span = span;
        Ok(StackItem::Element(regex))
    }

    fn reduce_repeat_count(&mut self, span: TextRange) -> Result<StackItem, ReduceError> {
        let number = self.pop::<Element>(SyntaxKind::RepeatCount, span)?;
        let ElementKind::Number(text) = &number.kind else {
            return Err(ReduceError::InvalidRepeatCount {
                text: number.describe().to_owned(),
                span: number.span,
            });
        };
        match text.parse::<u32>() {
            Ok(n) if n > 0 => Ok(StackItem::RepeatCount(n, span)),
            _ => Err(ReduceError::InvalidRepeatCount {
                text: text.clone(),
                span: number.span,
            }),
        }
    }

    /// Pops `value`, then `name`.
    fn reduce_attribute(
        &mut self,
        kind: SyntaxKind,
        span: TextRange,
    ) -> Result<Attribute, ReduceError> {
        let value = self.pop::<Element>(kind, span)?;
        let value = element_value(value)?;
        let (name, name_span) = self.pop_name(kind, span)?;
        Ok(Attribute::new(name, name_span, value, span))
    }

    fn reduce_definition(
        &mut self,
        kind: DefKind,
        span: TextRange,
    ) -> Result<StackItem, ReduceError> {
        let syntax_kind = match kind {
            DefKind::Rule => SyntaxKind::Definition,
            DefKind::Highlight => SyntaxKind::TmDefinition,
        };
        let properties: IndexMap<String, Attribute> = self
            .stack
            .pop_run::<PropertyItem>()
            .into_iter()
            .map(|PropertyItem(attr)| (attr.name.clone(), attr))
            .collect();
        let body = self.pop::<Element>(syntax_kind, span)?;
        let (name, name_span) = self.pop_name(syntax_kind, span)?;
        let body = self.thread_markers(body);
        log::trace!("definition `{name}` with {} properties", properties.len());
        Ok(StackItem::Definition(Box::new(Definition::new(
            kind, name, name_span, body, properties, span,
        ))))
    }

    fn reduce_root(&mut self, span: TextRange) -> Result<(), ReduceError> {
        let mut definitions = Vec::new();
        let mut options = Vec::new();
        for item in self.stack.pop_run::<TopLevel>() {
            match item {
                TopLevel::Definition(def) => definitions.push(*def),
                TopLevel::Option(attr) => options.push(attr),
            }
        }
        let leftovers = self.exit(SyntaxKind::Root, span)?;
        if let Some(extra) = leftovers.first() {
            return Err(ReduceError::Leftover {
                kind: SyntaxKind::Root,
                found: extra.describe(),
                span,
            });
        }
        self.grammar = Some(Grammar::new(definitions, options)?);
        Ok(())
    }

    /// Wrap `body` in every marker on top of the stack; the first one popped
    /// ends up innermost.
    fn thread_markers(&mut self, body: Element) -> Element {
        let mut acc = body;
        while let Some(MarkerItem(marker, marker_span)) = self.stack.try_pop::<MarkerItem>() {
            let span = marker_span.cover(acc.span);
            acc = Element::new(
                ElementKind::Marked {
                    marker,
                    child: Box::new(acc),
                },
                span,
            );
        }
        acc
    }

    fn pop_name(
        &mut self,
        kind: SyntaxKind,
        span: TextRange,
    ) -> Result<(String, TextRange), ReduceError> {
        let name = self.pop::<Element>(kind, span)?;
        match name.kind {
            ElementKind::Reference(text) => Ok((text, name.span)),
            _ => Err(ReduceError::Stack {
                source: StackError::Mismatch {
                    expected: "reference",
                    found: name.describe(),
                },
                kind,
                span: name.span,
            }),
        }
    }
}

fn element(kind: ElementKind, span: TextRange) -> StackItem {
    StackItem::Element(Element::new(kind, span))
}

fn element_value(element: Element) -> Result<Value, ReduceError> {
    match element.kind {
        ElementKind::Text(s) => Ok(Value::Text(s)),
        ElementKind::Number(n) => Ok(Value::Number(n)),
        ElementKind::Boolean(b) => Ok(Value::Boolean(b)),
        ElementKind::Reference(r) => Ok(Value::Reference(r)),
        _ => Err(ReduceError::InvalidValue {
            found: element.describe(),
            span: element.span,
        }),
    }
}

/// Strip the surrounding quotes and decode escapes.
fn string_value(text: &str) -> String {
    let inner = strip_delimiters(text, &['"', '\'']);
    escape::unescape(inner).into_owned()
}

/// Strip the surrounding slashes; `\/` stands for a literal slash.
fn regex_value(text: &str) -> String {
    strip_delimiters(text, &['/']).replace("\\/", "/")
}

fn strip_delimiters<'t>(text: &'t str, delimiters: &[char]) -> &'t str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if open == close && delimiters.contains(&open) => chars.as_str(),
        _ => text,
    }
}

#[cfg(test)]
mod reduce_tests;
