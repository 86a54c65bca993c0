//! FieldMask Legacy Text Pipeline
//!
//! Masks the bracket-delimited `key=value` text produced by printing nested
//! maps and lists, e.g. `{outer=val, inner=[{abc=secret}]}`:
//! - Recursive-descent parsing into `GenericNode`
//! - Sensitive-key masking at any depth
//! - Canonical re-rendering with `", "` separators
//!
//! # Example
//! ```
//! # use fieldmask_legacy::LegacyMasker;
//! let masker = LegacyMasker::default();
//! let masked = masker.mask("{abc=secret, test=value}").unwrap();
//! assert_eq!(masked, "{abc=<Masked>, test=value}");
//! ```

mod parser;
mod pipeline;

pub use parser::{parse, parse_with_limit};
pub use pipeline::LegacyMasker;
