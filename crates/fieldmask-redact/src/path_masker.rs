//! Path-driven masking of native JSON trees

use fieldmask_core::{DEFAULT_MAX_DEPTH, Error, PathRule, Result, RuleIndex};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::redactor::Redactor;

/// Outcome of one masking pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskingReport {
    /// Rules that matched at least one field
    pub applied_rules: usize,

    /// Fields overwritten with a masked value
    pub masked_fields: usize,

    /// Rules skipped because they could not be applied
    pub failed_rules: usize,
}

/// Masks the fields addressed by a scope's path rules
///
/// The rule index and redactor are shared read-only state; each call
/// borrows the caller's tree mutably for its duration only.
#[derive(Clone)]
pub struct PathMasker {
    rules: Arc<RuleIndex>,
    redactor: Arc<dyn Redactor>,
    max_depth: usize,
}

impl PathMasker {
    pub fn new(rules: Arc<RuleIndex>, redactor: Arc<dyn Redactor>) -> Self {
        Self {
            rules,
            redactor,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Reject rules with more path segments than `max_depth`
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn rules(&self) -> &RuleIndex {
        &self.rules
    }

    /// Apply every rule for `scope_id` to `tree`, mutating it in place.
    ///
    /// Missing fields and shape mismatches are skipped silently. A rule
    /// that cannot be applied is logged and skipped; the pass never fails.
    pub fn apply_masking(&self, scope_id: &str, tree: &mut Value) -> MaskingReport {
        let mut report = MaskingReport::default();

        let rules = self.rules.rules_for(scope_id);
        if rules.is_empty() {
            return report;
        }

        let Value::Object(root) = tree else {
            debug!(scope_id, "Payload root is not an object, nothing to mask");
            return report;
        };

        for rule in rules {
            match self.apply_rule(rule, root) {
                Ok(0) => debug!(scope_id, path = %rule.path, "Masking rule matched no fields"),
                Ok(count) => {
                    report.applied_rules += 1;
                    report.masked_fields += count;
                }
                Err(e) => {
                    warn!(scope_id, path = %rule.path, error = %e, "Failed to apply masking rule");
                    report.failed_rules += 1;
                }
            }
        }

        report
    }

    fn apply_rule(&self, rule: &PathRule, root: &mut Map<String, Value>) -> Result<usize> {
        let Some(segments) = rule.segments() else {
            return Ok(0);
        };

        if segments.len() > self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
            });
        }

        Ok(self.walk(root, &segments, &rule.masking_type))
    }

    /// Follow `segments` from `node`, fanning out over arrays of objects.
    /// Recursion depth is bounded by the number of segments.
    fn walk(&self, node: &mut Map<String, Value>, segments: &[&str], masking_type: &str) -> usize {
        let Some((key, rest)) = segments.split_first() else {
            return 0;
        };

        let Some(value) = node.get_mut(*key) else {
            return 0;
        };

        if value.is_null() {
            return 0;
        }

        if rest.is_empty() {
            *value = self.redactor.mask(value, masking_type);
            return 1;
        }

        match value {
            Value::Object(child) => self.walk(child, rest, masking_type),
            Value::Array(items) => items
                .iter_mut()
                .filter_map(Value::as_object_mut)
                .map(|child| self.walk(child, rest, masking_type))
                .sum(),
            _ => 0,
        }
    }
}

impl std::fmt::Debug for PathMasker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathMasker")
            .field("rules", &self.rules.len())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redactor::{DEFAULT_PLACEHOLDER, StandardRedactor};
    use fieldmask_core::COMMON_SCOPE;
    use serde_json::json;

    const SCOPE: &str = "NCDP_MIMEIN10A0";

    fn masker(rules: Vec<(&str, Vec<PathRule>)>) -> PathMasker {
        let index = RuleIndex::from_iter(
            rules
                .into_iter()
                .map(|(scope, rules)| (scope.to_string(), rules)),
        );
        PathMasker::new(Arc::new(index), Arc::new(StandardRedactor::default()))
    }

    fn customer_payload() -> Value {
        json!({
            "MIMEIN_IN_MST": {
                "MIMEIN_IN": {
                    "rlno": 9007021234567_i64,
                    "custNm": "홍길동",
                    "addr": "서울시 강남구"
                }
            }
        })
    }

    #[test]
    fn test_multiple_rules_and_mixed_types() {
        let masker = masker(vec![(
            SCOPE,
            vec![
                PathRule::new("MIMEIN_IN_MST.MIMEIN_IN.rlno", "type_rlno"),
                PathRule::new("MIMEIN_IN_MST.MIMEIN_IN.custNm", "type_name"),
            ],
        )]);

        let mut data = customer_payload();
        let report = masker.apply_masking(SCOPE, &mut data);

        let inner = &data["MIMEIN_IN_MST"]["MIMEIN_IN"];
        assert_eq!(inner["rlno"], json!(DEFAULT_PLACEHOLDER));
        assert_eq!(inner["custNm"], json!(DEFAULT_PLACEHOLDER));
        assert_eq!(inner["addr"], json!("서울시 강남구"));
        assert_eq!(
            report,
            MaskingReport {
                applied_rules: 2,
                masked_fields: 2,
                failed_rules: 0
            }
        );
    }

    #[test]
    fn test_no_rules_leaves_tree_unchanged() {
        let masker = masker(vec![]);

        let mut data = customer_payload();
        let report = masker.apply_masking("NO_RULES_ID", &mut data);

        assert_eq!(data, customer_payload());
        assert_eq!(report, MaskingReport::default());
    }

    #[test]
    fn test_path_precision() {
        let masker = masker(vec![(SCOPE, vec![PathRule::new("A.B.secret", "t")])]);

        let mut data = json!({"A": {"B": {"secret": "x", "public": "y"}}});
        masker.apply_masking(SCOPE, &mut data);

        assert_eq!(data["A"]["B"]["secret"], json!(DEFAULT_PLACEHOLDER));
        assert_eq!(data["A"]["B"]["public"], json!("y"));
    }

    #[test]
    fn test_array_fan_out() {
        let masker = masker(vec![(SCOPE, vec![PathRule::new("items.v", "t")])]);

        let mut data = json!({"items": [{"id": 1, "v": "s1"}, {"id": 2, "v": "s2"}]});
        let report = masker.apply_masking(SCOPE, &mut data);

        assert_eq!(
            data,
            json!({"items": [
                {"id": 1, "v": DEFAULT_PLACEHOLDER},
                {"id": 2, "v": DEFAULT_PLACEHOLDER}
            ]})
        );
        assert_eq!(report.masked_fields, 2);
        assert_eq!(report.applied_rules, 1);
    }

    #[test]
    fn test_array_skips_non_object_elements() {
        let masker = masker(vec![(SCOPE, vec![PathRule::new("items.v", "t")])]);

        let mut data = json!({"items": [1, "two", null, [{"v": "nested"}], {"v": "s"}]});
        masker.apply_masking(SCOPE, &mut data);

        assert_eq!(
            data,
            json!({"items": [1, "two", null, [{"v": "nested"}], {"v": DEFAULT_PLACEHOLDER}]})
        );
    }

    #[test]
    fn test_empty_array_is_not_an_error() {
        let masker = masker(vec![(
            SCOPE,
            vec![PathRule::new("CUSAFT_IN.CUSAFT_IN_SUB.acno", "type_account")],
        )]);

        let mut data = json!({"CUSAFT_IN": {"CUSAFT_IN_SUB": []}});
        let report = masker.apply_masking(SCOPE, &mut data);

        assert_eq!(data, json!({"CUSAFT_IN": {"CUSAFT_IN_SUB": []}}));
        assert_eq!(report.failed_rules, 0);
    }

    #[test]
    fn test_common_and_scope_rules_both_apply() {
        let masker = masker(vec![
            (
                COMMON_SCOPE,
                vec![
                    PathRule::new("pfmidata.rlno", "type_rlno"),
                    PathRule::new("pfminpt.rlno", "type_rlno"),
                ],
            ),
            (
                SCOPE,
                vec![PathRule::new("MIMEIN_IN_MST.MIMEIN_IN.custNm", "type_name")],
            ),
        ]);

        let mut data = json!({
            "pfmidata": {"rlno": "1234567890123"},
            "pfminpt": {"rlno": "9876543210987"},
            "MIMEIN_IN_MST": {"MIMEIN_IN": {"custNm": "김철수"}}
        });
        let report = masker.apply_masking(SCOPE, &mut data);

        assert_eq!(data["pfmidata"]["rlno"], json!(DEFAULT_PLACEHOLDER));
        assert_eq!(data["pfminpt"]["rlno"], json!(DEFAULT_PLACEHOLDER));
        assert_eq!(
            data["MIMEIN_IN_MST"]["MIMEIN_IN"]["custNm"],
            json!(DEFAULT_PLACEHOLDER)
        );
        assert_eq!(report.applied_rules, 3);
    }

    #[test]
    fn test_missing_and_mismatched_paths_are_skipped() {
        let masker = masker(vec![(
            SCOPE,
            vec![
                PathRule::new("missing.field", "t"),
                PathRule::new("scalar.deeper", "t"),
                PathRule::new("", "t"),
                PathRule::new("a..b", "t"),
                PathRule::new("ok", "t"),
            ],
        )]);

        let mut data = json!({"scalar": 5, "ok": "v"});
        let report = masker.apply_masking(SCOPE, &mut data);

        assert_eq!(data, json!({"scalar": 5, "ok": DEFAULT_PLACEHOLDER}));
        assert_eq!(report.applied_rules, 1);
        assert_eq!(report.failed_rules, 0);
    }

    #[test]
    fn test_null_and_empty_values_pass_through() {
        let masker = masker(vec![(
            SCOPE,
            vec![PathRule::new("a", "t"), PathRule::new("b", "t")],
        )]);

        let mut data = json!({"a": null, "b": ""});
        masker.apply_masking(SCOPE, &mut data);

        assert_eq!(data, json!({"a": null, "b": ""}));
    }

    #[test]
    fn test_terminal_container_is_replaced_whole() {
        let masker = masker(vec![(SCOPE, vec![PathRule::new("card", "t")])]);

        let mut data = json!({"card": {"no": "1234", "cvc": "999"}});
        masker.apply_masking(SCOPE, &mut data);

        assert_eq!(data, json!({"card": DEFAULT_PLACEHOLDER}));
    }

    #[test]
    fn test_non_object_root_is_untouched() {
        let masker = masker(vec![(SCOPE, vec![PathRule::new("a", "t")])]);

        let mut data = json!([{"a": "x"}]);
        masker.apply_masking(SCOPE, &mut data);
        assert_eq!(data, json!([{"a": "x"}]));

        let mut scalar = json!("a");
        masker.apply_masking(SCOPE, &mut scalar);
        assert_eq!(scalar, json!("a"));

        for root in [Value::Null, json!("")] {
            let mut data = root.clone();
            let report = masker.apply_masking(SCOPE, &mut data);
            assert_eq!(data, root);
            assert_eq!(report.masked_fields, 0);
        }
    }

    #[test]
    fn test_overlong_rule_fails_alone() {
        let masker = masker(vec![(
            SCOPE,
            vec![PathRule::new("a.b.c.d", "t"), PathRule::new("e", "t")],
        )])
        .with_max_depth(3);

        let mut data = json!({"a": {"b": {"c": {"d": "x"}}}, "e": "y"});
        let report = masker.apply_masking(SCOPE, &mut data);

        assert_eq!(data["a"]["b"]["c"]["d"], json!("x"));
        assert_eq!(data["e"], json!(DEFAULT_PLACEHOLDER));
        assert_eq!(report.failed_rules, 1);
        assert_eq!(report.applied_rules, 1);
    }

    #[test]
    fn test_idempotent() {
        let masker = masker(vec![(
            SCOPE,
            vec![
                PathRule::new("items.v", "t"),
                PathRule::new("A.B.secret", "t"),
            ],
        )]);

        let mut once = json!({"items": [{"v": 1}], "A": {"B": {"secret": 2}}});
        masker.apply_masking(SCOPE, &mut once);

        let mut twice = once.clone();
        masker.apply_masking(SCOPE, &mut twice);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_custom_strategy_reaches_walk() {
        let redactor = StandardRedactor::default()
            .with_strategy("upper", |original: &str| original.to_uppercase());
        let index = RuleIndex::from_iter([(SCOPE.to_string(), vec![PathRule::new("n", "upper")])]);
        let masker = PathMasker::new(Arc::new(index), Arc::new(redactor));

        let mut data = json!({"n": "abc"});
        masker.apply_masking(SCOPE, &mut data);

        assert_eq!(data, json!({"n": "ABC"}));
    }
}
