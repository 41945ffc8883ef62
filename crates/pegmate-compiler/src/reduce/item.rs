//! Operand stack payloads and their typed views.

use pegmate_core::{Describe, StackKind};
use rowan::TextRange;

use crate::ir::{Attribute, Definition, Element, Marker};

/// Suffix operator waiting for its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operator {
    Optional,
    ZeroOrMore,
    OneOrMore,
}

impl Operator {
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            Operator::Optional => "?",
            Operator::ZeroOrMore => "*",
            Operator::OneOrMore => "+",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum StackItem {
    Element(Element),
    Marker(Marker, TextRange),
    Operator(Operator, TextRange),
    RepeatCount(u32, TextRange),
    Property(Attribute),
    Option(Attribute),
    Definition(Box<Definition>),
}

impl Describe for StackItem {
    fn describe(&self) -> &'static str {
        match self {
            StackItem::Element(e) => e.describe(),
            StackItem::Marker(..) => "marker",
            StackItem::Operator(..) => "suffix operator",
            StackItem::RepeatCount(..) => "repeat count",
            StackItem::Property(_) => "property",
            StackItem::Option(_) => "option",
            StackItem::Definition(_) => "definition",
        }
    }
}

macro_rules! stack_kind {
    ($ty:ty, $name:literal, $shape:pat, $pat:pat => $value:expr) => {
        impl StackKind<StackItem> for $ty {
            const NAME: &'static str = $name;

            fn matches(item: &StackItem) -> bool {
                matches!(item, $shape)
            }

            fn extract(item: StackItem) -> Result<Self, StackItem> {
                match item {
                    $pat => Ok($value),
                    other => Err(other),
                }
            }
        }
    };
}

pub(crate) struct MarkerItem(pub Marker, pub TextRange);
pub(crate) struct OperatorItem(pub Operator, pub TextRange);
pub(crate) struct RepeatCountItem(pub u32, pub TextRange);
pub(crate) struct PropertyItem(pub Attribute);

/// Item allowed directly under the root.
pub(crate) enum TopLevel {
    Definition(Box<Definition>),
    Option(Attribute),
}

stack_kind!(Element, "element", StackItem::Element(_), StackItem::Element(e) => e);
stack_kind!(
    MarkerItem,
    "marker",
    StackItem::Marker(..),
    StackItem::Marker(m, span) => MarkerItem(m, span)
);
stack_kind!(
    OperatorItem,
    "suffix operator",
    StackItem::Operator(..),
    StackItem::Operator(op, span) => OperatorItem(op, span)
);
stack_kind!(
    RepeatCountItem,
    "repeat count",
    StackItem::RepeatCount(..),
    StackItem::RepeatCount(n, span) => RepeatCountItem(n, span)
);
stack_kind!(
    PropertyItem,
    "property",
    StackItem::Property(_),
    StackItem::Property(a) => PropertyItem(a)
);

impl StackKind<StackItem> for TopLevel {
    const NAME: &'static str = "definition or option";

    fn matches(item: &StackItem) -> bool {
        matches!(item, StackItem::Definition(_) | StackItem::Option(_))
    }

    fn extract(item: StackItem) -> Result<Self, StackItem> {
        match item {
            StackItem::Definition(d) => Ok(TopLevel::Definition(d)),
            StackItem::Option(a) => Ok(TopLevel::Option(a)),
            other => Err(other),
        }
    }
}
