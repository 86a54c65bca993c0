//! File-based masking configuration for FieldMask deployments
//!
//! This crate loads the process-wide masking state from a YAML or TOML file:
//! - Scope-keyed path rules (merged with the `common` scope at lookup)
//! - The case-insensitive sensitive-key set for legacy text
//! - Placeholder tokens, nesting limit and log level
//! - Environment overrides (`FIELDMASK_*`)
//!
//! # Example
//! ```no_run
//! # use fieldmask_config_file::FileConfigLoader;
//! # fn example() -> fieldmask_core::Result<()> {
//! let mut config = FileConfigLoader::new("~/.fieldmask/config.yaml")?.load()?;
//! config.merge_env();
//! let masker = config.path_masker();
//! # Ok(())
//! # }
//! ```

mod config;
mod file_loader;

pub use config::{LegacyConfig, LoggingConfig, MaskingConfig, MaskingSection};
pub use file_loader::FileConfigLoader;
