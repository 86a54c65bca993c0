//! Parse → mask → render pipeline for legacy-format text

use fieldmask_core::{DEFAULT_MAX_DEPTH, Result};
use fieldmask_redact::KeyMasker;
use tracing::debug;

use crate::parser::parse_with_limit;

/// Masks sensitive keys in legacy-format text
///
/// Malformed containers are reported as decode errors rather than passed
/// through, so callers never receive text that skipped masking.
#[derive(Debug, Clone)]
pub struct LegacyMasker {
    key_masker: KeyMasker,
    max_depth: usize,
}

impl LegacyMasker {
    pub fn new(key_masker: KeyMasker) -> Self {
        Self {
            key_masker: key_masker.with_max_depth(DEFAULT_MAX_DEPTH),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Nesting limit shared by parsing and masking
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.key_masker = self.key_masker.with_max_depth(max_depth);
        self.max_depth = max_depth;
        self
    }

    pub fn key_masker(&self) -> &KeyMasker {
        &self.key_masker
    }

    /// Mask every sensitive field in `data` and render it canonically.
    ///
    /// Blank input and input that does not start with `{` or `[` are
    /// returned unchanged.
    pub fn mask(&self, data: &str) -> Result<String> {
        let trimmed = data.trim();
        if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
            return Ok(data.to_string());
        }

        let mut tree = parse_with_limit(trimmed, self.max_depth)?;
        let masked = self.key_masker.mask(&mut tree)?;
        debug!(masked, "Masked sensitive legacy fields");

        Ok(tree.to_string())
    }

    /// [`mask`](Self::mask) with absent input passed through
    pub fn mask_optional(&self, data: Option<&str>) -> Result<Option<String>> {
        data.map(|data| self.mask(data)).transpose()
    }
}

impl Default for LegacyMasker {
    fn default() -> Self {
        Self::new(KeyMasker::default())
    }
}
