//! Reachability: unused definitions and the set of callable rules.

use std::collections::VecDeque;

use indexmap::IndexSet;

use super::visitor::collect_references;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ir::{DefId, DefKind, Definition, Grammar};

/// Warn about definitions reachable neither from the root nor from any
/// highlight definition. Without a root nothing is reported.
pub fn report_unused(grammar: &Grammar, root: Option<DefId>, diag: &mut Diagnostics) -> Vec<DefId> {
    let Some(root) = root else {
        return Vec::new();
    };

    let mut reached: IndexSet<DefId> = IndexSet::new();
    let mut queue: VecDeque<DefId> = std::iter::once(root)
        .chain(grammar.tm_definitions().map(Definition::id))
        .collect();

    while let Some(id) = queue.pop_front() {
        if !reached.insert(id) {
            continue;
        }
        let def = grammar.get(id);
        for target in dependencies(grammar, def) {
            // A self-reference does not keep a definition alive.
            if target != id && !reached.contains(&target) {
                queue.push_back(target);
            }
        }
    }

    let unused: Vec<DefId> = grammar
        .definitions()
        .map(Definition::id)
        .filter(|id| !reached.contains(id))
        .collect();
    for &id in &unused {
        let def = grammar.get(id);
        diag.report(DiagnosticKind::UnusedDefinition, def.name_span)
            .message(&def.name)
            .emit();
    }
    unused
}

/// Definitions that become parser rules: reachable from `root` through
/// body references, root first, breadth-first. Inline definitions are
/// looked through rather than included.
pub fn callable_rules(grammar: &Grammar, root: DefId) -> IndexSet<DefId> {
    let mut callable = IndexSet::new();
    let mut expanded = IndexSet::new();
    let mut queue = VecDeque::from([root]);

    callable.insert(root);
    while let Some(id) = queue.pop_front() {
        for reference in collect_references(&grammar.get(id).body) {
            let Some(target) = reference.as_reference().and_then(|n| grammar.find(n)) else {
                continue;
            };
            if target.kind != DefKind::Rule {
                continue;
            }
            if target.is_inline() && target.id() != root {
                if expanded.insert(target.id()) {
                    queue.push_back(target.id());
                }
            } else if callable.insert(target.id()) {
                queue.push_back(target.id());
            }
        }
    }
    log::trace!("{} callable rules", callable.len());
    callable
}

/// Body references plus definitions named by `begin`, `end` and `include`.
fn dependencies(grammar: &Grammar, def: &Definition) -> Vec<DefId> {
    let body = collect_references(&def.body)
        .into_iter()
        .filter_map(|r| r.as_reference());
    let properties = ["begin", "end", "include"]
        .into_iter()
        .flat_map(|name| def.property_names(name));
    body.chain(properties)
        .filter_map(|name| grammar.find(name))
        .map(Definition::id)
        .collect()
}
