//! Command bodies, kept free of process I/O where possible

use anyhow::Context;
use fieldmask_core::RuleIndex;
use fieldmask_redact::PathMasker;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Read the whole payload from `path`, or stdin when no path is given
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Parse `payload` as JSON, mask it for `scope` and render it back
pub fn mask_json(
    masker: &PathMasker,
    scope: &str,
    payload: &str,
    pretty: bool,
) -> anyhow::Result<String> {
    let mut tree: serde_json::Value =
        serde_json::from_str(payload).context("Input is not valid JSON")?;

    let report = masker.apply_masking(scope, &mut tree);
    info!(
        scope,
        applied_rules = report.applied_rules,
        masked_fields = report.masked_fields,
        failed_rules = report.failed_rules,
        "Masked JSON payload"
    );

    let rendered = if pretty {
        serde_json::to_string_pretty(&tree)?
    } else {
        serde_json::to_string(&tree)?
    };
    Ok(rendered)
}

/// One line per rule: `<path>\t<masking type>`
pub fn describe_rules(index: &RuleIndex, scope: &str) -> String {
    index
        .rules_for(scope)
        .iter()
        .map(|rule| format!("{}\t{}\n", rule.path, rule.masking_type))
        .collect()
}
