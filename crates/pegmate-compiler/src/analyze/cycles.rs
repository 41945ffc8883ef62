//! Inline-cycle detection.
//!
//! Depth-first walk over every resolvable reference with an explicit path
//! stack. Reaching a definition that is still on the path is an error when
//! that definition is inline; any other back edge is ordinary recursion.

use indexmap::{IndexMap, IndexSet};
use rowan::TextRange;

use super::visitor::collect_references;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ir::{DefId, Grammar};

pub fn check_inline_cycles(grammar: &Grammar, diag: &mut Diagnostics) {
    let mut finder = CycleFinder {
        grammar,
        visited: IndexSet::new(),
        on_path: IndexMap::new(),
        path: Vec::new(),
        edges: Vec::new(),
        cycles: Vec::new(),
    };
    for def in grammar.all() {
        finder.dfs(def.id());
    }

    for cycle in finder.cycles {
        let names: Vec<&str> = cycle
            .path
            .iter()
            .map(|&id| grammar.get(id).name.as_str())
            .collect();
        let target = grammar.get(cycle.path[0]);
        log::trace!("inline cycle {}", names.join(" -> "));

        let mut report = diag
            .report(DiagnosticKind::InlineCycle, target.name_span)
            .message(names.join(" -> "));
        for (window, range) in names.windows(2).zip(&cycle.references) {
            report = report.related_to(format!("{} references {}", window[0], window[1]), *range);
        }
        report.emit();
    }
}

struct Cycle {
    /// Definitions along the cycle, first one repeated at the end.
    path: Vec<DefId>,
    /// Reference span of every edge in `path`.
    references: Vec<TextRange>,
}

struct CycleFinder<'g> {
    grammar: &'g Grammar,
    visited: IndexSet<DefId>,
    on_path: IndexMap<DefId, usize>,
    path: Vec<DefId>,
    edges: Vec<TextRange>,
    cycles: Vec<Cycle>,
}

impl CycleFinder<'_> {
    fn dfs(&mut self, current: DefId) {
        if !self.visited.insert(current) {
            return;
        }
        self.on_path.insert(current, self.path.len());
        self.path.push(current);

        let grammar = self.grammar;
        for reference in collect_references(&grammar.get(current).body) {
            let Some(target) = reference.as_reference().and_then(|n| grammar.find(n)) else {
                continue;
            };
            if let Some(&start) = self.on_path.get(&target.id()) {
                if !target.is_inline() {
                    continue;
                }
                let mut path = self.path[start..].to_vec();
                path.push(target.id());
                let mut references = self.edges[start..].to_vec();
                references.push(reference.span);
                self.cycles.push(Cycle { path, references });
                continue;
            }

            self.edges.push(reference.span);
            self.dfs(target.id());
            self.edges.pop();
        }

        self.path.pop();
        self.on_path.swap_remove(&current);
    }
}
