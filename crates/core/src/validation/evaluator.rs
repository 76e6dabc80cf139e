//! Rule evaluator. Pure logic, no I/O.
//!
//! Field-specific rules run for every field independently. Global rules run
//! once per cluster in priority order and stop at the first one that fires.

use super::cluster::Cluster;
use super::messages::MessageLookup;
use super::priority::{lookup, ErrorKind, Scope};
use super::rules::{Rule, Violation};

/// Evaluate every rule of the cluster's spec against the submitted values.
///
/// Returns raw violations in evaluation order. An empty vector is a valid
/// cluster.
pub fn evaluate(cluster: &Cluster<'_>, messages: &dyn MessageLookup) -> Vec<Violation> {
    let spec = cluster.spec();
    let all_empty = cluster.all_empty();
    let mut violations = Vec::new();

    for rule in spec.field_rules() {
        if field_rule_applies(rule, cluster, all_empty) && rule.is_violated(cluster) {
            violations.push(build_violation(rule, cluster, messages));
        }
    }

    for rule in spec.global_rules() {
        if !global_rule_applies(rule, cluster, all_empty) {
            continue;
        }
        if rule.is_violated(cluster) {
            tracing::debug!(
                cluster = spec.name(),
                kind = rule.kind.as_str(),
                "Global rule fired, skipping lower-priority global rules"
            );
            violations.push(build_violation(rule, cluster, messages));
            break;
        }
    }

    tracing::debug!(
        cluster = spec.name(),
        violations = violations.len(),
        "Evaluated cluster"
    );
    violations
}

/// `FieldMissing` is owned by `AllFieldsMissing` when nothing was entered.
/// Every other field rule only checks a value that is present.
fn field_rule_applies(rule: &Rule, cluster: &Cluster<'_>, all_empty: bool) -> bool {
    match rule.kind {
        ErrorKind::FieldMissing => !all_empty,
        _ => rule
            .scope
            .field()
            .and_then(|name| cluster.field(name))
            .is_some_and(|f| !f.is_empty()),
    }
}

/// Semantic global rules need a structurally complete cluster.
fn global_rule_applies(rule: &Rule, cluster: &Cluster<'_>, all_empty: bool) -> bool {
    match rule.kind {
        ErrorKind::AllFieldsMissing => all_empty,
        _ => cluster.required_present(),
    }
}

fn build_violation(rule: &Rule, cluster: &Cluster<'_>, messages: &dyn MessageLookup) -> Violation {
    let spec = cluster.spec();
    let affected_fields: Vec<String> = match &rule.scope {
        Scope::Global => spec.field_names().map(str::to_string).collect(),
        Scope::FieldSpecific(field) => vec![field.clone()],
    };

    let label = rule
        .scope
        .field()
        .map(|field| messages.lookup(&spec.label_key(field), &[]))
        .unwrap_or_default();
    let params = [("field", label.as_str())];

    let summary_text = messages.lookup(&rule.message_key, &params);
    let inline_key = format!("{}.inline", rule.message_key);
    let inline_text = match messages.lookup(&inline_key, &params) {
        text if text == inline_key => summary_text.clone(),
        text => text,
    };

    Violation {
        kind: rule.kind,
        scope: rule.scope.clone(),
        tier: lookup(rule.kind).tier,
        evaluation_order: rule.evaluation_order,
        affected_fields,
        summary_text,
        inline_text,
        consolidated: false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
