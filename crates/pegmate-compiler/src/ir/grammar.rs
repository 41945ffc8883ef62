//! Grammar and definitions.

use std::collections::HashMap;

use indexmap::IndexMap;
use rowan::TextRange;

use super::{Attribute, Element, Marker, Value};

/// Index of a definition inside its [`Grammar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(u32);

impl DefId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Which back end a definition feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefKind {
    /// Parser rule; also usable by highlight rules.
    Rule,
    /// Highlight-only definition.
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    id: DefId,
    pub kind: DefKind,
    pub name: String,
    pub name_span: TextRange,
    /// Body with the definition-level markers threaded around it.
    pub body: Element,
    pub properties: IndexMap<String, Attribute>,
    pub span: TextRange,
}

impl Definition {
    pub fn new(
        kind: DefKind,
        name: impl Into<String>,
        name_span: TextRange,
        body: Element,
        properties: IndexMap<String, Attribute>,
        span: TextRange,
    ) -> Self {
        Self {
            id: DefId(0),
            kind,
            name: name.into(),
            name_span,
            body,
            properties,
            span,
        }
    }

    pub fn id(&self) -> DefId {
        self.id
    }

    /// Markers attached at the top of the body, outermost first.
    pub fn markers(&self) -> Vec<Marker> {
        self.body.peel_markers().0
    }

    pub fn has_marker(&self, predicate: impl Fn(Marker) -> bool) -> bool {
        self.markers().into_iter().any(predicate)
    }

    pub fn is_inline(&self) -> bool {
        self.has_marker(|m| m == Marker::TreatInline)
    }

    pub fn is_dropped(&self) -> bool {
        self.has_marker(|m| m == Marker::Drop)
    }

    pub fn is_terminal(&self) -> bool {
        self.has_marker(|m| matches!(m, Marker::IsTerminal { .. }))
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name).map(|a| &a.value)
    }

    /// Definition names held by a property: a bare reference, or a text of
    /// whitespace-separated names.
    pub fn property_names(&self, name: &str) -> Vec<&str> {
        match self.property(name) {
            Some(Value::Reference(target)) => vec![target.as_str()],
            Some(Value::Text(list)) => list.split_whitespace().collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("`{name}` is defined more than once (names are case-insensitive)")]
    /// Names and points at the first definition; `duplicate` is the later one.
    DuplicateName {
        name: String,
        span: TextRange,
        duplicate: TextRange,
    },
}

impl GrammarError {
    pub fn span(&self) -> TextRange {
        match self {
            GrammarError::DuplicateName { span, .. } => *span,
        }
    }
}

/// Root of the IR: definitions in source order plus global options.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    definitions: Vec<Definition>,
    by_name: HashMap<String, DefId>,
    options: IndexMap<String, Attribute>,
}

impl Grammar {
    /// Attach definitions and options, rejecting case-insensitive name clashes.
    ///
    /// A repeated option overrides the earlier one.
    pub fn new(
        definitions: Vec<Definition>,
        options: impl IntoIterator<Item = Attribute>,
    ) -> Result<Self, GrammarError> {
        let mut seen: HashMap<String, (String, TextRange)> = HashMap::new();
        let mut by_name = HashMap::new();
        let mut attached = Vec::with_capacity(definitions.len());

        for (index, mut def) in definitions.into_iter().enumerate() {
            let folded = def.name.to_lowercase();
            if let Some((name, span)) = seen.remove(&folded) {
                return Err(GrammarError::DuplicateName {
                    name,
                    span,
                    duplicate: def.name_span,
                });
            }
            seen.insert(folded, (def.name.clone(), def.name_span));

            def.id = DefId(index as u32);
            by_name.insert(def.name.clone(), def.id);
            attached.push(def);
        }

        let options = options
            .into_iter()
            .map(|attr| (attr.name.clone(), attr))
            .collect();

        Ok(Self {
            definitions: attached,
            by_name,
            options,
        })
    }

    pub fn get(&self, id: DefId) -> &Definition {
        &self.definitions[id.index()]
    }

    pub fn find(&self, name: &str) -> Option<&Definition> {
        self.by_name.get(name).map(|&id| self.get(id))
    }

    /// Every definition, parser rules and highlight definitions interleaved.
    pub fn all(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &Definition> {
        self.all().filter(|d| d.kind == DefKind::Rule)
    }

    pub fn tm_definitions(&self) -> impl Iterator<Item = &Definition> {
        self.all().filter(|d| d.kind == DefKind::Highlight)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name).map(|a| &a.value)
    }

    pub fn options(&self) -> impl Iterator<Item = &Attribute> {
        self.options.values()
    }
}
