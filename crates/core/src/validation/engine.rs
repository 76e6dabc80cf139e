//! End-to-end pass for one cluster: evaluate, aggregate, render.

use chrono::NaiveDate;

use super::aggregator::aggregate;
use super::cluster::{Cluster, ClusterSpec, FieldMap};
use super::evaluator::evaluate;
use super::messages::MessageLookup;
use super::render::{render, ErrorViewModel};
use super::rules::ValidationResult;

/// Validate one cluster's submitted values against its baseline.
///
/// Deterministic: the same inputs always give the same result.
pub fn validate_cluster(
    spec: &ClusterSpec,
    submitted: &FieldMap,
    baseline: &FieldMap,
    reference_date: NaiveDate,
    messages: &dyn MessageLookup,
) -> ValidationResult {
    let cluster = Cluster::new(spec, submitted, baseline, reference_date);
    let violations = evaluate(&cluster, messages);
    aggregate(spec, violations, messages)
}

/// [`validate_cluster`] followed by the view-model translation.
pub fn validate_and_render(
    spec: &ClusterSpec,
    submitted: &FieldMap,
    baseline: &FieldMap,
    reference_date: NaiveDate,
    messages: &dyn MessageLookup,
) -> ErrorViewModel {
    let result = validate_cluster(spec, submitted, baseline, reference_date, messages);
    render(spec, &result)
}
