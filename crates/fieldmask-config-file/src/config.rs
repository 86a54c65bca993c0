//! Masking configuration schema and environment overrides

use fieldmask_core::{DEFAULT_MAX_DEPTH, Error, Result, RuleIndex};
use fieldmask_legacy::LegacyMasker;
use fieldmask_redact::{
    DEFAULT_LEGACY_PLACEHOLDER, DEFAULT_PLACEHOLDER, DEFAULT_SENSITIVE_KEYS, KeyMasker,
    PathMasker, RedactorConfig, StandardRedactor,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaskingConfig {
    #[serde(default)]
    pub masking: MaskingSection,

    #[serde(default)]
    pub legacy: LegacyConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Path-rule masking settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskingSection {
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Nesting limit for both subsystems
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Constant tokens for specific masking types
    #[serde(default)]
    pub type_placeholders: HashMap<String, String>,

    /// Scope id → ordered path rules; `common` applies to every scope
    #[serde(default)]
    pub mappings: RuleIndex,
}

/// Sensitive-key masking settings for legacy text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyConfig {
    #[serde(default = "default_legacy_placeholder")]
    pub placeholder: String,

    #[serde(default = "default_sensitive_keys")]
    pub sensitive_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for MaskingSection {
    fn default() -> Self {
        Self {
            placeholder: default_placeholder(),
            max_depth: default_max_depth(),
            type_placeholders: HashMap::new(),
            mappings: RuleIndex::default(),
        }
    }
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            placeholder: default_legacy_placeholder(),
            sensitive_keys: default_sensitive_keys(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl MaskingConfig {
    /// Check values the schema alone cannot enforce
    pub fn validate(&self) -> Result<()> {
        if self.masking.placeholder.is_empty() {
            return Err(Error::ConfigValidation(
                "'masking.placeholder' must not be empty".to_string(),
            ));
        }
        if self.legacy.placeholder.is_empty() {
            return Err(Error::ConfigValidation(
                "'legacy.placeholder' must not be empty".to_string(),
            ));
        }
        if self.masking.max_depth == 0 {
            return Err(Error::ConfigValidation(
                "'masking.max_depth' must be greater than 0".to_string(),
            ));
        }

        for scope in self.masking.mappings.scopes() {
            for rule in self.masking.mappings.scope_rules(scope) {
                if rule.segments().is_none() {
                    return Err(Error::ConfigValidation(format!(
                        "Invalid path '{}' in scope '{}'",
                        rule.path, scope
                    )));
                }
                if rule.masking_type.trim().is_empty() {
                    return Err(Error::ConfigValidation(format!(
                        "Missing masking type for path '{}' in scope '{}'",
                        rule.path, scope
                    )));
                }
            }
        }

        if let Some(key) = self
            .legacy
            .sensitive_keys
            .iter()
            .find(|key| key.trim().is_empty())
        {
            return Err(Error::ConfigValidation(format!(
                "Blank sensitive key {:?}",
                key
            )));
        }

        Ok(())
    }

    /// Apply `FIELDMASK_*` environment overrides
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("FIELDMASK_LOG_LEVEL") {
            self.logging.level = val;
        }

        if let Ok(val) = std::env::var("FIELDMASK_MAX_DEPTH") {
            match val.parse::<usize>() {
                Ok(depth) if depth > 0 => self.masking.max_depth = depth,
                _ => eprintln!(
                    "Warning: Invalid FIELDMASK_MAX_DEPTH '{}', keeping {}",
                    val, self.masking.max_depth
                ),
            }
        }

        if let Ok(val) = std::env::var("FIELDMASK_PLACEHOLDER") {
            if val.is_empty() {
                eprintln!("Warning: Empty FIELDMASK_PLACEHOLDER ignored");
            } else {
                self.masking.placeholder = val;
            }
        }

        if let Ok(val) = std::env::var("FIELDMASK_LEGACY_PLACEHOLDER") {
            if val.is_empty() {
                eprintln!("Warning: Empty FIELDMASK_LEGACY_PLACEHOLDER ignored");
            } else {
                self.legacy.placeholder = val;
            }
        }

        // Appended to, not replacing, the configured keys
        if let Ok(val) = std::env::var("FIELDMASK_SENSITIVE_KEYS") {
            self.legacy.sensitive_keys.extend(
                val.split(',')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .map(str::to_string),
            );
        }
    }

    pub fn rule_index(&self) -> RuleIndex {
        self.masking.mappings.clone()
    }

    pub fn redactor(&self) -> StandardRedactor {
        StandardRedactor::new(RedactorConfig {
            placeholder: self.masking.placeholder.clone(),
            type_placeholders: self.masking.type_placeholders.clone(),
        })
    }

    pub fn path_masker(&self) -> PathMasker {
        PathMasker::new(Arc::new(self.rule_index()), Arc::new(self.redactor()))
            .with_max_depth(self.masking.max_depth)
    }

    pub fn key_masker(&self) -> KeyMasker {
        KeyMasker::new(&self.legacy.sensitive_keys, self.legacy.placeholder.clone())
            .with_max_depth(self.masking.max_depth)
    }

    pub fn legacy_masker(&self) -> LegacyMasker {
        LegacyMasker::new(self.key_masker()).with_max_depth(self.masking.max_depth)
    }
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_legacy_placeholder() -> String {
    DEFAULT_LEGACY_PLACEHOLDER.to_string()
}

fn default_sensitive_keys() -> Vec<String> {
    DEFAULT_SENSITIVE_KEYS.iter().map(|key| key.to_string()).collect()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_log_level() -> String {
    "info".to_string()
}
