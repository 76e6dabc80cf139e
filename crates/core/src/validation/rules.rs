//! Validation rule and result types.

use std::fmt;

use serde::Serialize;

use super::cluster::Cluster;
use super::priority::{ErrorKind, Scope};

/// Predicate over one trimmed field value. `true` means violated.
pub type FieldPredicate = fn(&str) -> bool;

/// Predicate over a whole cluster snapshot. `true` means violated.
pub type ClusterPredicate = fn(&Cluster<'_>) -> bool;

#[derive(Clone, Copy)]
pub enum Predicate {
    Field(FieldPredicate),
    Cluster(ClusterPredicate),
}

/// One immutable rule declared on a cluster.
#[derive(Clone)]
pub struct Rule {
    pub kind: ErrorKind,
    pub scope: Scope,
    /// Tie-break within a priority tier. Follows declaration order.
    pub evaluation_order: u32,
    pub message_key: String,
    pub predicate: Predicate,
}

impl Rule {
    /// Run the predicate against the cluster.
    ///
    /// Field predicates receive the trimmed value of the scoped field.
    pub fn is_violated(&self, cluster: &Cluster<'_>) -> bool {
        match (&self.predicate, &self.scope) {
            (Predicate::Field(check), Scope::FieldSpecific(field)) => check(cluster.value(field)),
            (Predicate::Cluster(check), _) => check(cluster),
            // The builder never pairs a field predicate with a global scope.
            (Predicate::Field(_), Scope::Global) => false,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let predicate = match self.predicate {
            Predicate::Field(_) => "field",
            Predicate::Cluster(_) => "cluster",
        };
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("scope", &self.scope)
            .field("evaluation_order", &self.evaluation_order)
            .field("message_key", &self.message_key)
            .field("predicate", &predicate)
            .finish()
    }
}

/// The result of one rule firing. Lives for a single validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ErrorKind,
    pub scope: Scope,
    pub tier: u8,
    pub evaluation_order: u32,
    /// Fields the violation is about, in declaration order.
    pub affected_fields: Vec<String>,
    pub summary_text: String,
    pub inline_text: String,
    /// Set on the single violation synthesised from several missing fields.
    pub consolidated: bool,
}

/// Aggregated outcome for one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_invalid: bool,
    pub selected_violations: Vec<Violation>,
    /// Fields to style as "has error", in declaration order, no duplicates.
    pub highlighted_fields: Vec<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_invalid: false,
            selected_violations: Vec::new(),
            highlighted_fields: Vec::new(),
        }
    }
}
