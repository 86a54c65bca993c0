//! Common test utilities for integration tests

use fieldmask_core::{PathRule, RuleIndex};
use fieldmask_redact::{PathMasker, StandardRedactor};
use std::sync::Arc;

/// Build a path masker over `(scope, [(path, masking_type)])` rules
#[allow(dead_code)]
pub fn path_masker(rules: Vec<(&str, Vec<(&str, &str)>)>) -> PathMasker {
    let index = RuleIndex::from_iter(rules.into_iter().map(|(scope, rules)| {
        (
            scope.to_string(),
            rules
                .into_iter()
                .map(|(path, masking_type)| PathRule::new(path, masking_type))
                .collect(),
        )
    }));

    PathMasker::new(Arc::new(index), Arc::new(StandardRedactor::default()))
}

/// Route engine logs to the test harness output
#[allow(dead_code)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}
