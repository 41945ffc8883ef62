//! Scoped operand stack.
//!
//! Every pushed item is tagged with the depth the stack had at push time.
//! Entering a scope records the current depth as the scope's floor; all
//! typed reads (`pop`, `peek`, `pop_run`) only see items tagged strictly
//! above that floor. A reduction therefore never consumes a value that was
//! produced outside its own scope, such as a sibling's leftovers.

/// Human-readable name of a stack item, for error messages.
pub trait Describe {
    fn describe(&self) -> &'static str;
}

/// Typed view over one kind of stack item.
///
/// Implemented once per payload kind. `extract` hands the item back on
/// mismatch so the stack can put it back untouched.
pub trait StackKind<T>: Sized {
    /// Name used in error messages.
    const NAME: &'static str;

    fn matches(item: &T) -> bool;

    fn extract(item: T) -> Result<Self, T>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    #[error("no open scope to exit")]
    NoOpenScope,

    #[error("expected {expected}, but the current scope is empty")]
    Empty { expected: &'static str },

    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Debug, Clone)]
struct Entry<T> {
    depth: u32,
    item: T,
}

/// Last-in-first-out container partitioned into nested scopes.
#[derive(Debug, Clone)]
pub struct ScopedStack<T> {
    entries: Vec<Entry<T>>,
    /// Floor depth of every open scope, innermost last.
    floors: Vec<u32>,
}

impl<T> Default for ScopedStack<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            floors: Vec::new(),
        }
    }
}

impl<T: Describe> ScopedStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth (number of open scopes).
    pub fn depth(&self) -> u32 {
        self.floors.len() as u32
    }

    pub fn enter_scope(&mut self) {
        self.floors.push(self.depth());
    }

    /// Close the innermost scope, draining and returning (in push order) every
    /// item still visible in it.
    pub fn exit_scope(&mut self) -> Result<Vec<T>, StackError> {
        let floor = self.floors.pop().ok_or(StackError::NoOpenScope)?;
        let split = self
            .entries
            .iter()
            .rposition(|e| e.depth <= floor)
            .map_or(0, |i| i + 1);
        Ok(self.entries.drain(split..).map(|e| e.item).collect())
    }

    pub fn push(&mut self, item: T) {
        let depth = self.depth();
        self.entries.push(Entry { depth, item });
    }

    /// Number of items visible in the current scope.
    pub fn scope_len(&self) -> usize {
        self.entries
            .iter()
            .rev()
            .take_while(|e| self.is_visible(e))
            .count()
    }

    pub fn is_scope_empty(&self) -> bool {
        self.top().is_none()
    }

    /// Pop the top item as `K`, failing if it is absent or of another kind.
    pub fn pop<K: StackKind<T>>(&mut self) -> Result<K, StackError> {
        let Some(top) = self.top() else {
            return Err(StackError::Empty { expected: K::NAME });
        };
        let found = top.describe();
        self.try_pop::<K>().ok_or(StackError::Mismatch {
            expected: K::NAME,
            found,
        })
    }

    /// Pop the top item as `K` if it is one; otherwise leave the stack alone.
    pub fn try_pop<K: StackKind<T>>(&mut self) -> Option<K> {
        if !self.top().is_some_and(K::matches) {
            return None;
        }
        let entry = self.entries.pop()?;
        match K::extract(entry.item) {
            Ok(value) => Some(value),
            Err(item) => {
                self.entries.push(Entry {
                    depth: entry.depth,
                    item,
                });
                None
            }
        }
    }

    /// Peek at the top item if it is a `K`.
    pub fn peek<K: StackKind<T>>(&self) -> Option<&T> {
        self.top().filter(|item| K::matches(item))
    }

    /// Pop the maximal run of `K` items from the top, returned in push order.
    pub fn pop_run<K: StackKind<T>>(&mut self) -> Vec<K> {
        let mut run = Vec::new();
        while let Some(item) = self.try_pop::<K>() {
            run.push(item);
        }
        run.reverse();
        run
    }

    fn top(&self) -> Option<&T> {
        self.entries
            .last()
            .filter(|e| self.is_visible(e))
            .map(|e| &e.item)
    }

    fn is_visible(&self, entry: &Entry<T>) -> bool {
        self.floors.last().is_none_or(|&floor| entry.depth > floor)
    }
}
