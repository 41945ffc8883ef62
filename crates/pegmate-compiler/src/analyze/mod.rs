//! Validation and analysis passes over the grammar IR.
//!
//! Pass ordering:
//! 1. `names` - unknown options/properties, undefined references
//! 2. `cycles` - inline expansion cycles (errors)
//! 3. `reachability` - unused definitions (warnings), callable rules
//! 4. `relevance` - which rules keep a node and a visitor callback

mod cycles;
mod names;
mod reachability;
mod relevance;
pub mod visitor;

#[cfg(test)]
mod analyze_tests;

use indexmap::IndexSet;

use crate::diagnostics::Diagnostics;
use crate::ir::{DefId, DefKind, Grammar};

pub use names::{KNOWN_OPTIONS, KNOWN_PROPERTIES};

/// Facts about a grammar consumed by the back ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    root: Option<DefId>,
    callable: IndexSet<DefId>,
    relevant: IndexSet<DefId>,
    unused: Vec<DefId>,
}

impl Analysis {
    pub fn root(&self) -> Option<DefId> {
        self.root
    }

    /// Rules the parser needs, root first.
    pub fn callable(&self) -> impl Iterator<Item = DefId> + '_ {
        self.callable.iter().copied()
    }

    pub fn is_callable(&self, id: DefId) -> bool {
        self.callable.contains(&id)
    }

    /// Rules that keep their own parse node and get a visitor callback.
    pub fn relevant(&self) -> impl Iterator<Item = DefId> + '_ {
        self.relevant.iter().copied()
    }

    pub fn is_relevant(&self, id: DefId) -> bool {
        self.relevant.contains(&id)
    }

    pub fn unused(&self) -> &[DefId] {
        &self.unused
    }
}

/// Run every pass, appending findings to `diag`.
///
/// `root` names the entry rule; when it is absent or does not name a parser
/// rule, the reachability-based facts are left empty.
pub fn analyze(grammar: &Grammar, root: Option<&str>, diag: &mut Diagnostics) -> Analysis {
    names::check_names(grammar, diag);
    cycles::check_inline_cycles(grammar, diag);

    let root = root
        .and_then(|name| grammar.find(name))
        .filter(|def| def.kind == DefKind::Rule)
        .map(|def| def.id());

    let unused = reachability::report_unused(grammar, root, diag);
    let (callable, relevant) = match root {
        Some(root) => (
            reachability::callable_rules(grammar, root),
            relevance::relevant_definitions(grammar, root),
        ),
        None => Default::default(),
    };

    log::debug!(
        "analysis: {} callable, {} relevant, {} unused, {} diagnostics",
        callable.len(),
        relevant.len(),
        unused.len(),
        diag.len()
    );

    Analysis {
        root,
        callable,
        relevant,
        unused,
    }
}
