//! IR Visitor pattern.
//!
//! # Usage
//!
//! Implement `Visitor` for your struct. Override `visit_*` methods to add logic.
//! Call `walk_*` within your override to continue recursion (or omit it to stop).
//!
//! ```ignore
//! impl<'g> Visitor<'g> for MyPass {
//!     fn visit_marked(&mut self, element: &'g Element, marker: Marker, child: &'g Element) {
//!         // Pre-order logic
//!         walk_element(self, child);
//!     }
//! }
//! ```

use crate::ir::{Definition, Element, ElementKind, Marker};

pub trait Visitor<'g>: Sized {
    fn visit_definition(&mut self, def: &'g Definition) {
        walk_definition(self, def);
    }

    fn visit_element(&mut self, element: &'g Element) {
        walk_element(self, element);
    }

    fn visit_reference(&mut self, _element: &'g Element, _name: &'g str) {
        // Leaf in the IR (semantic traversal happens via Grammar lookup)
    }

    fn visit_marked(&mut self, _element: &'g Element, _marker: Marker, child: &'g Element) {
        self.visit_element(child);
    }
}

pub fn walk_definition<'g, V: Visitor<'g>>(visitor: &mut V, def: &'g Definition) {
    visitor.visit_element(&def.body);
}

pub fn walk_element<'g, V: Visitor<'g>>(visitor: &mut V, element: &'g Element) {
    match &element.kind {
        ElementKind::Reference(name) => visitor.visit_reference(element, name),
        ElementKind::Marked { marker, child } => visitor.visit_marked(element, *marker, child),
        ElementKind::Sequence(l, r) | ElementKind::Choice(l, r) => {
            visitor.visit_element(l);
            visitor.visit_element(r);
        }
        ElementKind::Optional(e)
        | ElementKind::ZeroOrMore(e)
        | ElementKind::OneOrMore(e)
        | ElementKind::Not(e) => visitor.visit_element(e),
        ElementKind::Text(_)
        | ElementKind::Regex { .. }
        | ElementKind::Number(_)
        | ElementKind::Boolean(_) => {}
    }
}

/// Every reference element under `element`, in source order.
pub fn collect_references(element: &Element) -> Vec<&Element> {
    struct Collector<'g>(Vec<&'g Element>);

    impl<'g> Visitor<'g> for Collector<'g> {
        fn visit_reference(&mut self, element: &'g Element, _name: &'g str) {
            self.0.push(element);
        }
    }

    let mut collector = Collector(Vec::new());
    collector.visit_element(element);
    collector.0
}
