//! Key-driven masking of legacy-format trees

use fieldmask_core::{DEFAULT_MAX_DEPTH, Error, GenericNode, Result};
use std::collections::HashSet;

use crate::redactor::DEFAULT_LEGACY_PLACEHOLDER;

/// Field names masked when no deployment-specific set is configured
pub const DEFAULT_SENSITIVE_KEYS: &[&str] = &["abc", "xyz"];

/// Masks every field whose key is in the sensitive-key set, at any depth
#[derive(Debug, Clone)]
pub struct KeyMasker {
    sensitive_keys: HashSet<String>,
    placeholder: String,
    max_depth: usize,
}

impl KeyMasker {
    /// Keys are matched case-insensitively.
    pub fn new<I, S>(sensitive_keys: I, placeholder: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            sensitive_keys: sensitive_keys
                .into_iter()
                .map(|key| key.as_ref().to_lowercase())
                .collect(),
            placeholder: placeholder.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn is_sensitive(&self, key: &str) -> bool {
        self.sensitive_keys.contains(&key.to_lowercase())
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Replace sensitive values in `node`, returning how many were replaced.
    ///
    /// A sensitive key's whole value is replaced, even when it is a container.
    /// Fails with `DepthExceeded` when containers nest deeper than the limit.
    pub fn mask(&self, node: &mut GenericNode) -> Result<usize> {
        self.mask_at(node, 1)
    }

    fn mask_at(&self, node: &mut GenericNode, depth: usize) -> Result<usize> {
        // A bare pair sits at its array element's depth
        if let GenericNode::Field(key, value) = &mut *node {
            if self.is_sensitive(key) {
                **value = GenericNode::Scalar(self.placeholder.clone());
                return Ok(1);
            }
            return self.mask_at(value, depth);
        }

        if !node.is_container() {
            return Ok(0);
        }
        if depth > self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
            });
        }

        let mut masked = 0;
        match node {
            GenericNode::Object(entries) => {
                for (key, value) in entries.iter_mut() {
                    if self.is_sensitive(key) {
                        *value = GenericNode::Scalar(self.placeholder.clone());
                        masked += 1;
                    } else {
                        masked += self.mask_at(value, depth + 1)?;
                    }
                }
            }
            GenericNode::Array(elements) => {
                for element in elements.iter_mut() {
                    masked += self.mask_at(element, depth + 1)?;
                }
            }
            GenericNode::Scalar(_) | GenericNode::Field(..) => {}
        }

        Ok(masked)
    }
}

impl Default for KeyMasker {
    fn default() -> Self {
        Self::new(DEFAULT_SENSITIVE_KEYS, DEFAULT_LEGACY_PLACEHOLDER)
    }
}
