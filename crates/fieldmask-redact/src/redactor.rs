//! Masked-value redaction

mod standard_redactor;

pub use standard_redactor::StandardRedactor;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Token written by path-rule masking
pub const DEFAULT_PLACEHOLDER: &str = "<Protected_Mci_Data>";

/// Token written by sensitive-key masking of legacy text
pub const DEFAULT_LEGACY_PLACEHOLDER: &str = "<Masked>";

/// Masking-type keywords reserved for type-specific strategies.
///
/// None of them has a built-in transform yet; until one is registered they
/// resolve to the fallback placeholder.
pub mod keywords {
    /// Resident registration number (keep birth date, hide the rest)
    pub const RLNO: &str = "type_rlno";

    /// Personal name (keep first and last character)
    pub const NAME: &str = "type_name";

    /// Street address (hide from the first numeral on)
    pub const ADDRESS: &str = "type_address";

    /// Account number
    pub const ACCOUNT: &str = "type_account";
}

/// Transform from an original value's text to its masked text
pub trait MaskingStrategy: Send + Sync {
    fn apply(&self, original: &str) -> String;
}

impl<F> MaskingStrategy for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn apply(&self, original: &str) -> String {
        self(original)
    }
}

/// Replace any value with a constant token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder(String);

impl Placeholder {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl MaskingStrategy for Placeholder {
    fn apply(&self, _original: &str) -> String {
        self.0.clone()
    }
}

/// Trait for producing the masked form of a single value
pub trait Redactor: Send + Sync {
    /// Mask `value` according to `masking_type`.
    ///
    /// `null` and `""` come back unchanged; every other value is stringified
    /// and replaced by a string, so the value's JSON type may change.
    fn mask(&self, value: &Value, masking_type: &str) -> Value;
}

/// Configuration for the standard redactor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedactorConfig {
    /// Token used when no strategy is registered for a keyword
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Per-keyword constant tokens, registered as placeholder strategies
    #[serde(default)]
    pub type_placeholders: HashMap<String, String>,
}

impl Default for RedactorConfig {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            type_placeholders: HashMap::new(),
        }
    }
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

/// Text form of a value, or `None` for `null`
pub(crate) fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
