//! Generic tree for the legacy bracket text format
//!
//! `Display` renders the canonical text form: `{key=value, key=value}` for
//! objects, `[value, value]` for arrays and the literal text for scalars,
//! always separated by `", "`. A bare `key=value` array element renders
//! without braces.

use std::fmt;

/// Separator written between entries
pub const ENTRY_SEPARATOR: &str = ", ";

/// A parsed legacy-format value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenericNode {
    /// Literal text, trimmed of surrounding whitespace
    Scalar(String),

    /// Key/value pairs in input order; keys are unique
    Object(Vec<(String, GenericNode)>),

    /// Elements in input order
    Array(Vec<GenericNode>),

    /// A `key=value` pair written directly inside an array
    Field(String, Box<GenericNode>),
}

impl GenericNode {
    pub fn scalar(text: impl Into<String>) -> Self {
        GenericNode::Scalar(text.into())
    }

    pub fn field(key: impl Into<String>, value: GenericNode) -> Self {
        GenericNode::Field(key.into(), Box::new(value))
    }

    /// Look up an object entry by exact key
    pub fn get(&self, key: &str) -> Option<&GenericNode> {
        match self {
            GenericNode::Object(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            GenericNode::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Objects and arrays; a bare field is neither
    pub fn is_container(&self) -> bool {
        matches!(self, GenericNode::Object(_) | GenericNode::Array(_))
    }
}

impl fmt::Display for GenericNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericNode::Scalar(text) => f.write_str(text),
            GenericNode::Object(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(ENTRY_SEPARATOR)?;
                    }
                    write!(f, "{}={}", key, value)?;
                }
                f.write_str("}")
            }
            GenericNode::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(ENTRY_SEPARATOR)?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            GenericNode::Field(key, value) => write!(f, "{}={}", key, value),
        }
    }
}
