//! Cluster definitions and per-request cluster snapshots.
//!
//! A [`ClusterSpec`] is declared once per cluster type through
//! [`ClusterSpecBuilder`], which rejects malformed definitions up front. A
//! [`Cluster`] pairs a spec with the values submitted in one request and the
//! baseline they are compared against.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use super::change;
use super::priority::{lookup, ErrorKind, Scope, ScopeKind};
use super::rules::{ClusterPredicate, FieldPredicate, Predicate, Rule};
use crate::error::CoreError;

/// Raw form values keyed by field name.
pub type FieldMap = HashMap<String, String>;

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// A named input inside a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    pub fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// Immutable definition of a cluster: fields in declaration order plus the
/// rules that apply to them.
#[derive(Debug, Clone)]
pub struct ClusterSpec {
    name: &'static str,
    anchor: &'static str,
    fields: Vec<FieldSpec>,
    field_rules: Vec<Rule>,
    global_rules: Vec<Rule>,
}

impl ClusterSpec {
    pub fn builder(name: &'static str, anchor: &'static str) -> ClusterSpecBuilder {
        ClusterSpecBuilder {
            name,
            anchor,
            fields: Vec::new(),
            rules: Vec::new(),
            detect_changes: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fragment id the error summary links to for global violations.
    pub fn anchor(&self) -> &'static str {
        self.anchor
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Field-specific rules, grouped by field in declaration order.
    pub fn field_rules(&self) -> &[Rule] {
        &self.field_rules
    }

    /// Global rules, in priority order.
    pub fn global_rules(&self) -> &[Rule] {
        &self.global_rules
    }

    /// Message key for the display label of a field.
    pub fn label_key(&self, field: &str) -> String {
        format!("{}.{field}.label", self.name)
    }

    /// Message key for the consolidated missing-fields message.
    pub fn missing_fields_key(&self) -> String {
        format!("{}.missing_fields", self.name)
    }
}

/// A rule as declared, before evaluation order is assigned.
struct PendingRule {
    kind: ErrorKind,
    scope: Scope,
    message_key: String,
    predicate: Predicate,
}

/// Builder for [`ClusterSpec`].
///
/// Required fields get a `FieldMissing` rule automatically and every cluster
/// gets an `AllFieldsMissing` rule. Message keys follow
/// `<cluster>.<field>.missing` and `<cluster>.all_missing`.
pub struct ClusterSpecBuilder {
    name: &'static str,
    anchor: &'static str,
    fields: Vec<FieldSpec>,
    rules: Vec<PendingRule>,
    detect_changes: bool,
}

impl ClusterSpecBuilder {
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a field-specific rule checked against the trimmed value.
    pub fn field_rule(
        mut self,
        field: &'static str,
        kind: ErrorKind,
        message_key: &str,
        predicate: FieldPredicate,
    ) -> Self {
        self.rules.push(PendingRule {
            kind,
            scope: Scope::FieldSpecific(field.to_string()),
            message_key: message_key.to_string(),
            predicate: Predicate::Field(predicate),
        });
        self
    }

    /// Declare a cross-field rule evaluated once per cluster.
    pub fn global_rule(
        mut self,
        kind: ErrorKind,
        message_key: &str,
        predicate: ClusterPredicate,
    ) -> Self {
        self.rules.push(PendingRule {
            kind,
            scope: Scope::Global,
            message_key: message_key.to_string(),
            predicate: Predicate::Cluster(predicate),
        });
        self
    }

    /// Reject submissions identical to the baseline (`<cluster>.unchanged`).
    pub fn detect_changes(mut self) -> Self {
        self.detect_changes = true;
        self
    }

    pub fn build(self) -> Result<ClusterSpec, CoreError> {
        let name = self.name;
        if self.fields.is_empty() {
            return Err(CoreError::InvalidDefinition(format!(
                "Cluster '{name}' declares no fields"
            )));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name) {
                return Err(CoreError::InvalidDefinition(format!(
                    "Cluster '{name}' declares field '{}' twice",
                    field.name
                )));
            }
        }

        let mut declared: Vec<PendingRule> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| PendingRule {
                kind: ErrorKind::FieldMissing,
                scope: Scope::FieldSpecific(f.name.to_string()),
                message_key: format!("{name}.{}.missing", f.name),
                predicate: Predicate::Field(str::is_empty),
            })
            .collect();
        declared.push(PendingRule {
            kind: ErrorKind::AllFieldsMissing,
            scope: Scope::Global,
            message_key: format!("{name}.all_missing"),
            predicate: Predicate::Cluster(all_fields_empty),
        });
        declared.extend(self.rules);
        if self.detect_changes {
            declared.push(PendingRule {
                kind: ErrorKind::Unchanged,
                scope: Scope::Global,
                message_key: format!("{name}.unchanged"),
                predicate: Predicate::Cluster(change::is_unchanged),
            });
        }

        for rule in &declared {
            let expected = lookup(rule.kind).scope;
            if rule.scope.kind() != expected {
                return Err(CoreError::InvalidDefinition(format!(
                    "Cluster '{name}': rule '{}' is declared {:?} but '{}' is {:?}",
                    rule.message_key,
                    rule.scope.kind(),
                    rule.kind.as_str(),
                    expected
                )));
            }
            if let Scope::FieldSpecific(field) = &rule.scope {
                if !seen.contains(field.as_str()) {
                    return Err(CoreError::InvalidDefinition(format!(
                        "Cluster '{name}': rule '{}' references unknown field '{field}'",
                        rule.message_key
                    )));
                }
            }
        }

        // Field rules: grouped by field declaration order, stable within a field.
        let field_index = |field: &str| {
            self.fields
                .iter()
                .position(|f| f.name == field)
                .unwrap_or(usize::MAX)
        };
        let (mut field_pending, mut global_pending): (Vec<_>, Vec<_>) = declared
            .into_iter()
            .partition(|r| r.scope.kind() == ScopeKind::FieldSpecific);
        field_pending.sort_by_key(|r| r.scope.field().map(|f| field_index(f)).unwrap_or(usize::MAX));
        global_pending.sort_by_key(|r| lookup(r.kind).tier);

        let mut order = 0u32;
        let mut assign = |pending: Vec<PendingRule>| -> Vec<Rule> {
            pending
                .into_iter()
                .map(|p| {
                    order += 1;
                    Rule {
                        kind: p.kind,
                        scope: p.scope,
                        evaluation_order: order,
                        message_key: p.message_key,
                        predicate: p.predicate,
                    }
                })
                .collect()
        };
        let field_rules = assign(field_pending);
        let global_rules = assign(global_pending);

        Ok(ClusterSpec {
            name,
            anchor: self.anchor,
            fields: self.fields,
            field_rules,
            global_rules,
        })
    }
}

// ---------------------------------------------------------------------------
// Per-request snapshot
// ---------------------------------------------------------------------------

/// One input as submitted in this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub raw_value: String,
    /// Baseline value, `None` when the record has no previous value.
    pub original_value: Option<String>,
}

impl Field {
    /// The trimmed submitted value.
    pub fn value(&self) -> &str {
        self.raw_value.trim()
    }

    /// The trimmed baseline value.
    pub fn original(&self) -> Option<&str> {
        self.original_value.as_deref().map(str::trim)
    }

    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }
}

/// A cluster's values for one validation pass.
#[derive(Debug, Clone)]
pub struct Cluster<'a> {
    spec: &'a ClusterSpec,
    fields: Vec<Field>,
    reference_date: NaiveDate,
}

impl<'a> Cluster<'a> {
    /// Build the snapshot from the submitted body and the baseline.
    ///
    /// Missing submitted keys read as empty. An empty baseline means the
    /// record has no previous value; otherwise a missing baseline key reads
    /// as empty. `reference_date` is "today" for future-date checks.
    pub fn new(
        spec: &'a ClusterSpec,
        submitted: &FieldMap,
        baseline: &FieldMap,
        reference_date: NaiveDate,
    ) -> Self {
        let fields = spec
            .fields()
            .iter()
            .map(|f| Field {
                name: f.name,
                required: f.required,
                raw_value: submitted.get(f.name).cloned().unwrap_or_default(),
                original_value: if baseline.is_empty() {
                    None
                } else {
                    Some(baseline.get(f.name).cloned().unwrap_or_default())
                },
            })
            .collect();
        Self {
            spec,
            fields,
            reference_date,
        }
    }

    pub fn spec(&self) -> &'a ClusterSpec {
        self.spec
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Trimmed value of a field. Unknown names read as empty.
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map(Field::value).unwrap_or("")
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// True when no field in the cluster has a value.
    pub fn all_empty(&self) -> bool {
        self.fields.iter().all(Field::is_empty)
    }

    /// True when every required field has a value.
    pub fn required_present(&self) -> bool {
        self.fields.iter().filter(|f| f.required).all(|f| !f.is_empty())
    }
}

fn all_fields_empty(cluster: &Cluster<'_>) -> bool {
    cluster.all_empty()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn not_numeric(v: &str) -> bool {
        !v.chars().all(|c| c.is_ascii_digit())
    }

    fn never(_: &Cluster<'_>) -> bool {
        false
    }

    fn two_field_spec() -> ClusterSpec {
        ClusterSpec::builder("pair", "pair")
            .field(FieldSpec::required("left"))
            .field(FieldSpec::optional("right"))
            .field_rule("right", ErrorKind::FormatInvalid, "pair.right.format", not_numeric)
            .field_rule("left", ErrorKind::FormatInvalid, "pair.left.format", not_numeric)
            .global_rule(ErrorKind::BusinessRuleViolated, "pair.rule", never)
            .detect_changes()
            .build()
            .unwrap()
    }

    fn map(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn builder_adds_missing_rules_for_required_fields_only() {
        let spec = two_field_spec();
        let missing: Vec<_> = spec
            .field_rules()
            .iter()
            .filter(|r| r.kind == ErrorKind::FieldMissing)
            .collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].scope, Scope::FieldSpecific("left".into()));
        assert_eq!(missing[0].message_key, "pair.left.missing");
    }

    #[test]
    fn field_rules_follow_field_declaration_order() {
        let spec = two_field_spec();
        let fields: Vec<_> = spec
            .field_rules()
            .iter()
            .map(|r| r.scope.field().unwrap().to_string())
            .collect();
        assert_eq!(fields, vec!["left", "left", "right"]);
        let orders: Vec<_> = spec.field_rules().iter().map(|r| r.evaluation_order).collect();
        assert!(orders.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn global_rules_sorted_by_tier() {
        let spec = two_field_spec();
        let kinds: Vec<_> = spec.global_rules().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ErrorKind::AllFieldsMissing,
                ErrorKind::BusinessRuleViolated,
                ErrorKind::Unchanged
            ]
        );
    }

    #[test]
    fn rejects_empty_cluster() {
        let result = ClusterSpec::builder("empty", "empty").build();
        assert_matches!(result, Err(CoreError::InvalidDefinition(_)));
    }

    #[test]
    fn rejects_duplicate_field() {
        let result = ClusterSpec::builder("dup", "dup")
            .field(FieldSpec::required("a"))
            .field(FieldSpec::optional("a"))
            .build();
        assert_matches!(result, Err(CoreError::InvalidDefinition(msg)) if msg.contains("twice"));
    }

    #[test]
    fn rejects_rule_on_unknown_field() {
        let result = ClusterSpec::builder("bad", "bad")
            .field(FieldSpec::required("a"))
            .field_rule("b", ErrorKind::FormatInvalid, "bad.b.format", not_numeric)
            .build();
        assert_matches!(result, Err(CoreError::InvalidDefinition(msg)) if msg.contains("unknown field 'b'"));
    }

    #[test]
    fn rejects_scope_disagreeing_with_priority_table() {
        let result = ClusterSpec::builder("bad", "bad")
            .field(FieldSpec::required("a"))
            .field_rule("a", ErrorKind::Unchanged, "bad.a.unchanged", not_numeric)
            .build();
        assert_matches!(result, Err(CoreError::InvalidDefinition(_)));

        let result = ClusterSpec::builder("bad", "bad")
            .field(FieldSpec::required("a"))
            .global_rule(ErrorKind::FormatInvalid, "bad.format", never)
            .build();
        assert_matches!(result, Err(CoreError::InvalidDefinition(_)));
    }

    #[test]
    fn cluster_trims_values_and_defaults_missing_keys() {
        let spec = two_field_spec();
        let cluster = Cluster::new(&spec, &map(&[("left", "  12 ")]), &FieldMap::new(), today());
        assert_eq!(cluster.value("left"), "12");
        assert_eq!(cluster.value("right"), "");
        assert_eq!(cluster.value("nope"), "");
        assert!(cluster.required_present());
        assert!(!cluster.all_empty());
    }

    #[test]
    fn empty_baseline_means_no_previous_value() {
        let spec = two_field_spec();
        let cluster = Cluster::new(&spec, &map(&[("left", "1")]), &FieldMap::new(), today());
        assert!(cluster.fields().iter().all(|f| f.original().is_none()));

        let cluster = Cluster::new(&spec, &map(&[("left", "1")]), &map(&[("left", "1")]), today());
        assert_eq!(cluster.field("left").unwrap().original(), Some("1"));
        assert_eq!(cluster.field("right").unwrap().original(), Some(""));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let spec = two_field_spec();
        let cluster = Cluster::new(
            &spec,
            &map(&[("left", "   "), ("right", "\t")]),
            &FieldMap::new(),
            today(),
        );
        assert!(cluster.all_empty());
        assert!(!cluster.required_present());
    }
}
