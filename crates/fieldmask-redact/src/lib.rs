//! FieldMask Redaction Engines
//!
//! This crate provides the two masking passes and the redaction policy they share:
//! - Path-driven masking of native JSON trees (`PathMasker`)
//! - Key-driven masking of legacy-format trees (`KeyMasker`)
//! - An open keyword → strategy registry for masked values (`StandardRedactor`)

pub mod key_masker;
pub mod path_masker;
pub mod redactor;

pub use key_masker::{DEFAULT_SENSITIVE_KEYS, KeyMasker};
pub use path_masker::{MaskingReport, PathMasker};
pub use redactor::{
    DEFAULT_LEGACY_PLACEHOLDER, DEFAULT_PLACEHOLDER, MaskingStrategy, Placeholder, Redactor,
    RedactorConfig, StandardRedactor,
};
