//! Generation settings.
//!
//! Every setting can come from a grammar option or be set explicitly;
//! explicit settings win.

use crate::ir::{Grammar, Value};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Entry rule of the generated parser
    pub(crate) root: Option<String>,
    /// Appended to every highlight scope name
    pub(crate) scope_suffix: Option<String>,
    /// Whether to emit a visitor trait next to the parser
    pub(crate) generate_visitor: Option<bool>,
    /// Module wrapping the generated code
    pub(crate) namespace: Option<String>,
    /// Prefix of the visitor trait name
    pub(crate) class_name: Option<String>,
    pub(crate) tm_name: Option<String>,
    pub(crate) tm_scope_name: Option<String>,
    pub(crate) tm_file_types: Option<Vec<String>>,
}

impl Config {
    /// Create a new Config with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a config from the grammar's options.
    pub fn from_grammar(grammar: &Grammar) -> Self {
        let text = |name: &str| grammar.option(name).and_then(Value::as_str).map(str::to_owned);
        Self {
            root: text("root"),
            scope_suffix: text("scope_suffix"),
            generate_visitor: grammar.option("generate_visitor").and_then(Value::as_bool),
            namespace: text("namespace"),
            class_name: text("class_name"),
            tm_name: text("tm_name"),
            tm_scope_name: text("tm_scope_name"),
            tm_file_types: grammar
                .option("tm_file_types")
                .and_then(Value::as_str)
                .map(split_list),
        }
    }

    /// Fill every setting left unset in `self` from `base`.
    pub fn or(self, base: Config) -> Self {
        Self {
            root: self.root.or(base.root),
            scope_suffix: self.scope_suffix.or(base.scope_suffix),
            generate_visitor: self.generate_visitor.or(base.generate_visitor),
            namespace: self.namespace.or(base.namespace),
            class_name: self.class_name.or(base.class_name),
            tm_name: self.tm_name.or(base.tm_name),
            tm_scope_name: self.tm_scope_name.or(base.tm_scope_name),
            tm_file_types: self.tm_file_types.or(base.tm_file_types),
        }
    }

    /// Set the entry rule.
    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.root = Some(name.into());
        self
    }

    /// Set the suffix appended to highlight scopes.
    pub fn scope_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.scope_suffix = Some(suffix.into());
        self
    }

    /// Set whether to emit a visitor trait.
    pub fn generate_visitor(mut self, value: bool) -> Self {
        self.generate_visitor = Some(value);
        self
    }

    /// Wrap generated code in `pub mod <name>`.
    pub fn namespace(mut self, name: impl Into<String>) -> Self {
        self.namespace = Some(name.into());
        self
    }

    pub fn class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    pub fn tm_name(mut self, name: impl Into<String>) -> Self {
        self.tm_name = Some(name.into());
        self
    }

    pub fn tm_scope_name(mut self, name: impl Into<String>) -> Self {
        self.tm_scope_name = Some(name.into());
        self
    }

    pub fn tm_file_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.tm_file_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn get_root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn get_scope_suffix(&self) -> Option<&str> {
        self.scope_suffix.as_deref().filter(|s| !s.is_empty())
    }

    pub fn get_generate_visitor(&self) -> bool {
        self.generate_visitor.unwrap_or(false)
    }

    pub fn get_namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn get_class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn get_tm_name(&self) -> Option<&str> {
        self.tm_name.as_deref()
    }

    pub fn get_tm_scope_name(&self) -> Option<&str> {
        self.tm_scope_name.as_deref()
    }

    pub fn get_tm_file_types(&self) -> &[String] {
        self.tm_file_types.as_deref().unwrap_or_default()
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
