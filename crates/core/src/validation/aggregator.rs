//! Collapses raw violations into what the form shows for one cluster.
//!
//! Several missing fields become one consolidated message. Otherwise exactly
//! one violation is selected: lowest tier first, then lowest evaluation
//! order. The result never carries more than one summary entry per cluster.

use super::cluster::ClusterSpec;
use super::highlight::highlight_violations;
use super::messages::{join_labels, MessageLookup};
use super::priority::ErrorKind;
use super::rules::{ValidationResult, Violation};

/// Aggregate the evaluator's output for `spec` into a [`ValidationResult`].
pub fn aggregate(
    spec: &ClusterSpec,
    violations: Vec<Violation>,
    messages: &dyn MessageLookup,
) -> ValidationResult {
    if violations.is_empty() {
        return ValidationResult::valid();
    }

    let mut missing: Vec<&Violation> = violations
        .iter()
        .filter(|v| v.kind == ErrorKind::FieldMissing)
        .collect();
    missing.sort_by_key(|v| v.evaluation_order);
    missing.dedup_by(|a, b| a.scope == b.scope);

    // All-missing is reported as one cluster-level message, never consolidated.
    let all_missing = violations
        .iter()
        .any(|v| v.kind == ErrorKind::AllFieldsMissing);

    let selected = if missing.len() >= 2 && !all_missing {
        tracing::debug!(
            cluster = spec.name(),
            missing = missing.len(),
            "Consolidating missing fields"
        );
        consolidate(spec, &missing, messages)
    } else {
        select(violations)
    };

    let selected_violations = vec![selected];
    let highlighted_fields = highlight_violations(&selected_violations);
    ValidationResult {
        is_invalid: true,
        selected_violations,
        highlighted_fields,
    }
}

/// Pick the single violation to surface.
fn select(violations: Vec<Violation>) -> Violation {
    let mut violations = violations;
    violations.sort_by_key(|v| (v.tier, v.evaluation_order));
    let selected = violations.swap_remove(0);
    tracing::debug!(
        kind = selected.kind.as_str(),
        tier = selected.tier,
        discarded = violations.len(),
        "Selected violation"
    );
    selected
}

/// Merge missing-field violations into one, naming the fields in
/// declaration order.
fn consolidate(
    spec: &ClusterSpec,
    missing: &[&Violation],
    messages: &dyn MessageLookup,
) -> Violation {
    let fields: Vec<String> = missing
        .iter()
        .filter_map(|v| v.scope.field().map(str::to_string))
        .collect();
    let labels: Vec<String> = fields
        .iter()
        .map(|f| messages.lookup(&spec.label_key(f), &[]))
        .collect();
    let joined = join_labels(&labels);

    let key = spec.missing_fields_key();
    let text = messages.lookup(&key, &[("fields", joined.as_str())]);

    let first = missing[0];
    Violation {
        kind: ErrorKind::FieldMissing,
        scope: first.scope.clone(),
        tier: first.tier,
        evaluation_order: first.evaluation_order,
        affected_fields: fields,
        summary_text: text.clone(),
        inline_text: text,
        consolidated: true,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
