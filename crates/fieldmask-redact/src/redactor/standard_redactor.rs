//! Standard redactor implementation

use crate::redactor::{MaskingStrategy, Placeholder, Redactor, RedactorConfig, stringify};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Keyword-dispatched redactor with a placeholder fallback
pub struct StandardRedactor {
    config: RedactorConfig,
    strategies: HashMap<String, Arc<dyn MaskingStrategy>>,
    fallback: Arc<dyn MaskingStrategy>,
}

impl StandardRedactor {
    /// Create a new standard redactor with the given configuration
    pub fn new(config: RedactorConfig) -> Self {
        let strategies: HashMap<String, Arc<dyn MaskingStrategy>> = config
            .type_placeholders
            .iter()
            .map(|(keyword, token)| {
                let strategy: Arc<dyn MaskingStrategy> = Arc::new(Placeholder::new(token.clone()));
                (keyword.clone(), strategy)
            })
            .collect();

        let fallback = Arc::new(Placeholder::new(config.placeholder.clone()));

        Self {
            config,
            strategies,
            fallback,
        }
    }

    /// Register a strategy for `keyword`, replacing any previous one
    pub fn with_strategy(
        mut self,
        keyword: impl Into<String>,
        strategy: impl MaskingStrategy + 'static,
    ) -> Self {
        self.register(keyword, strategy);
        self
    }

    pub fn register(&mut self, keyword: impl Into<String>, strategy: impl MaskingStrategy + 'static) {
        self.strategies.insert(keyword.into(), Arc::new(strategy));
    }

    pub fn has_strategy(&self, keyword: &str) -> bool {
        self.strategies.contains_key(keyword)
    }

    /// Token used for keywords without a registered strategy
    pub fn placeholder(&self) -> &str {
        &self.config.placeholder
    }

    fn strategy_for(&self, masking_type: &str) -> &dyn MaskingStrategy {
        self.strategies
            .get(masking_type)
            .map(Arc::as_ref)
            .unwrap_or(self.fallback.as_ref())
    }
}

impl Default for StandardRedactor {
    fn default() -> Self {
        Self::new(RedactorConfig::default())
    }
}

impl std::fmt::Debug for StandardRedactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keywords: Vec<&String> = self.strategies.keys().collect();
        keywords.sort();
        f.debug_struct("StandardRedactor")
            .field("placeholder", &self.config.placeholder)
            .field("strategies", &keywords)
            .finish()
    }
}

impl Redactor for StandardRedactor {
    fn mask(&self, value: &Value, masking_type: &str) -> Value {
        let Some(original) = stringify(value) else {
            return Value::Null;
        };

        if original.is_empty() {
            return Value::String(original);
        }

        Value::String(self.strategy_for(masking_type).apply(&original))
    }
}
