//! Tree construction for front ends.

use rowan::{Checkpoint, GreenNodeBuilder};

use super::{SyntaxKind, SyntaxNode};

/// Thin wrapper over rowan's green-node builder, typed by [`SyntaxKind`].
#[derive(Default)]
pub struct TreeBuilder {
    inner: GreenNodeBuilder<'static>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        debug_assert!(kind.is_node(), "{kind:?} is not a node kind");
        self.inner.start_node(kind.into());
    }

    /// Wrap everything added since `checkpoint` in a node of `kind`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        debug_assert!(kind.is_node(), "{kind:?} is not a node kind");
        self.inner.start_node_at(checkpoint, kind.into());
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.inner.checkpoint()
    }

    pub fn token(&mut self, kind: SyntaxKind, text: &str) {
        debug_assert!(!kind.is_node(), "{kind:?} is not a token kind");
        self.inner.token(kind.into(), text);
    }

    pub fn finish_node(&mut self) {
        self.inner.finish_node();
    }

    pub fn finish(self) -> SyntaxNode {
        SyntaxNode::new_root(self.inner.finish())
    }
}
