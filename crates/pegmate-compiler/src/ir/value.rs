use rowan::TextRange;

/// Value of a grammar option or a definition property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Text(String),
    Number(String),
    Boolean(bool),
    /// Bare identifier, usually naming a definition.
    Reference(String),
}

impl Value {
    /// Textual payload of `Text` and `Reference` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Reference(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Number(n) => n.parse().ok(),
            _ => None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Reference(_) => "reference",
        }
    }
}

/// `name = value` pair, used for both options and properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub name_span: TextRange,
    pub value: Value,
    pub span: TextRange,
}

impl Attribute {
    pub fn new(name: impl Into<String>, name_span: TextRange, value: Value, span: TextRange) -> Self {
        Self {
            name: name.into(),
            name_span,
            value,
            span,
        }
    }
}
