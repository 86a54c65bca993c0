//! Path rules and the scope-keyed rule index

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scope whose rules are merged into every lookup
pub const COMMON_SCOPE: &str = "common";

/// Separator between path segments
pub const PATH_SEPARATOR: char = '.';

/// One field to redact, addressed by a dot-delimited path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRule {
    /// Dot-delimited path, e.g. `MIMEIN_IN_MST.MIMEIN_IN.rlno`
    #[serde(alias = "jsonPath", alias = "json_path")]
    pub path: String,

    /// Keyword selecting the masking strategy
    #[serde(alias = "maskingType")]
    pub masking_type: String,
}

impl PathRule {
    pub fn new(path: impl Into<String>, masking_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            masking_type: masking_type.into(),
        }
    }

    /// Split the path into its segments.
    ///
    /// Returns `None` when any segment is blank (`""`, `"a..b"`, `"a."`),
    /// which callers treat as "matches nothing".
    pub fn segments(&self) -> Option<Vec<&str>> {
        let segments: Vec<&str> = self.path.split(PATH_SEPARATOR).collect();
        if segments.iter().any(|s| s.trim().is_empty()) {
            return None;
        }
        Some(segments)
    }
}

/// Immutable mapping from scope id to its ordered path rules
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleIndex {
    mappings: HashMap<String, Vec<PathRule>>,
}

impl RuleIndex {
    pub fn new(mappings: HashMap<String, Vec<PathRule>>) -> Self {
        Self { mappings }
    }

    /// Rules that apply to `scope_id`: the common rules first, then the
    /// scope's own rules. Unknown scopes yield just the common rules.
    /// Asking for the `common` scope itself returns its rules once, not twice.
    pub fn rules_for(&self, scope_id: &str) -> Vec<&PathRule> {
        let common = self.scope_rules(COMMON_SCOPE);
        if scope_id == COMMON_SCOPE {
            return common.iter().collect();
        }

        common.iter().chain(self.scope_rules(scope_id)).collect()
    }

    /// Rules registered directly under `scope_id`, without the common merge
    pub fn scope_rules(&self, scope_id: &str) -> &[PathRule] {
        self.mappings
            .get(scope_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.mappings.keys().map(String::as_str)
    }

    /// Total number of rules across all scopes
    pub fn len(&self) -> usize {
        self.mappings.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(String, Vec<PathRule>)> for RuleIndex {
    fn from_iter<I: IntoIterator<Item = (String, Vec<PathRule>)>>(iter: I) -> Self {
        let mut mappings: HashMap<String, Vec<PathRule>> = HashMap::new();
        for (scope, rules) in iter {
            mappings.entry(scope).or_default().extend(rules);
        }
        Self { mappings }
    }
}
