//! FieldMask Core Types
//!
//! This crate provides the types shared by both masking subsystems:
//! - Path rules and the scope-keyed rule index
//! - The generic Scalar/Object/Array tree used by the legacy text format
//! - Core error types

pub mod error;
pub mod node;
pub mod rules;

pub use error::{DecodeErrorKind, Error, Result};
pub use node::GenericNode;
pub use rules::{COMMON_SCOPE, PathRule, RuleIndex};

/// Default nesting limit for every recursive walk in the engine.
pub const DEFAULT_MAX_DEPTH: usize = 64;
