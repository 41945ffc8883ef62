//! Relevance: which definitions keep their own node and visitor callback.
//!
//! A reachable definition is relevant unless it is dropped or inline, and
//! only if it can match varying text. A reference reached under a choice,
//! optional or zero-or-more is relevant regardless, since whether it matched
//! at all is information. The walk does not look inside terminals, dropped
//! elements or negations: nothing under them survives into the tree.

use indexmap::IndexSet;

use crate::ir::{DefId, Element, ElementKind, Grammar, Marker};

pub fn relevant_definitions(grammar: &Grammar, root: DefId) -> IndexSet<DefId> {
    let mut walk = RelevanceWalk {
        grammar,
        relevant: IndexSet::new(),
        walked: IndexSet::new(),
        expanding: IndexSet::new(),
    };
    if !grammar.get(root).is_dropped() {
        walk.relevant.insert(root);
    }
    walk.walk_definition(root);
    walk.relevant
}

struct RelevanceWalk<'g> {
    grammar: &'g Grammar,
    relevant: IndexSet<DefId>,
    walked: IndexSet<DefId>,
    /// Inline definitions being expanded, to stop on cycles.
    expanding: IndexSet<DefId>,
}

impl<'g> RelevanceWalk<'g> {
    fn walk_definition(&mut self, id: DefId) {
        if self.walked.insert(id) {
            let grammar = self.grammar;
            self.walk(&grammar.get(id).body, false);
        }
    }

    fn walk(&mut self, element: &'g Element, forced: bool) {
        match &element.kind {
            ElementKind::Reference(name) => self.reach(name, forced),
            ElementKind::Choice(l, r) => {
                self.walk(l, true);
                self.walk(r, true);
            }
            ElementKind::Optional(e) | ElementKind::ZeroOrMore(e) => self.walk(e, true),
            ElementKind::Sequence(l, r) => {
                self.walk(l, forced);
                self.walk(r, forced);
            }
            ElementKind::OneOrMore(e) => self.walk(e, forced),
            ElementKind::Marked { marker, child } => match marker {
                Marker::Drop | Marker::IsTerminal { .. } => {}
                _ => self.walk(child, forced),
            },
            ElementKind::Not(_)
            | ElementKind::Text(_)
            | ElementKind::Regex { .. }
            | ElementKind::Number(_)
            | ElementKind::Boolean(_) => {}
        }
    }

    fn reach(&mut self, name: &str, forced: bool) {
        let grammar = self.grammar;
        let Some(target) = grammar.find(name) else {
            return;
        };
        let id = target.id();

        if target.is_inline() {
            if self.expanding.insert(id) {
                self.walk(&target.body, forced);
                self.expanding.swap_remove(&id);
            }
            return;
        }

        if !target.is_dropped() && (forced || target.body.matches_variable_text(grammar)) {
            log::trace!("`{}` is relevant{}", target.name, if forced { " (forced)" } else { "" });
            self.relevant.insert(id);
        }
        self.walk_definition(id);
    }
}
