//! Error taxonomy and the static priority table.
//!
//! Every [`ErrorKind`] maps to exactly one priority tier and scope. Lower
//! tiers are surfaced first when several violations apply to one cluster.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Wire codes for each error kind.
pub const KIND_ALL_FIELDS_MISSING: &str = "all_fields_missing";
pub const KIND_FIELD_MISSING: &str = "field_missing";
pub const KIND_FORMAT_INVALID: &str = "format_invalid";
pub const KIND_BUSINESS_RULE_VIOLATED: &str = "business_rule_violated";
pub const KIND_FUTURE_VALUE_NOT_ALLOWED: &str = "future_value_not_allowed";
pub const KIND_UNCHANGED: &str = "unchanged";

/// All valid error kind codes.
pub const VALID_ERROR_KINDS: &[&str] = &[
    KIND_ALL_FIELDS_MISSING,
    KIND_FIELD_MISSING,
    KIND_FORMAT_INVALID,
    KIND_BUSINESS_RULE_VIOLATED,
    KIND_FUTURE_VALUE_NOT_ALLOWED,
    KIND_UNCHANGED,
];

/// Priority applied to anything the table does not recognise.
pub const FALLBACK_PRIORITY: PriorityEntry = PriorityEntry {
    tier: 15,
    scope: ScopeKind::FieldSpecific,
};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Closed taxonomy of validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AllFieldsMissing,
    FieldMissing,
    FormatInvalid,
    BusinessRuleViolated,
    FutureValueNotAllowed,
    Unchanged,
}

impl ErrorKind {
    /// Every enumerant, in declaration order.
    pub const ALL: [ErrorKind; 6] = [
        Self::AllFieldsMissing,
        Self::FieldMissing,
        Self::FormatInvalid,
        Self::BusinessRuleViolated,
        Self::FutureValueNotAllowed,
        Self::Unchanged,
    ];

    /// Convert from a wire code. Returns `None` for unknown codes.
    pub fn from_str_value(s: &str) -> Option<Self> {
        match s {
            KIND_ALL_FIELDS_MISSING => Some(Self::AllFieldsMissing),
            KIND_FIELD_MISSING => Some(Self::FieldMissing),
            KIND_FORMAT_INVALID => Some(Self::FormatInvalid),
            KIND_BUSINESS_RULE_VIOLATED => Some(Self::BusinessRuleViolated),
            KIND_FUTURE_VALUE_NOT_ALLOWED => Some(Self::FutureValueNotAllowed),
            KIND_UNCHANGED => Some(Self::Unchanged),
            _ => None,
        }
    }

    /// Convert to the wire code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllFieldsMissing => KIND_ALL_FIELDS_MISSING,
            Self::FieldMissing => KIND_FIELD_MISSING,
            Self::FormatInvalid => KIND_FORMAT_INVALID,
            Self::BusinessRuleViolated => KIND_BUSINESS_RULE_VIOLATED,
            Self::FutureValueNotAllowed => KIND_FUTURE_VALUE_NOT_ALLOWED,
            Self::Unchanged => KIND_UNCHANGED,
        }
    }
}

/// Whether a kind applies to a whole cluster or to one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeKind {
    Global,
    FieldSpecific,
}

/// Scope of a concrete rule or violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "field")]
pub enum Scope {
    Global,
    FieldSpecific(String),
}

impl Scope {
    pub fn kind(&self) -> ScopeKind {
        match self {
            Self::Global => ScopeKind::Global,
            Self::FieldSpecific(_) => ScopeKind::FieldSpecific,
        }
    }

    /// The field this scope is attached to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Global => None,
            Self::FieldSpecific(name) => Some(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority table
// ---------------------------------------------------------------------------

/// Tier and scope for one error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriorityEntry {
    pub tier: u8,
    pub scope: ScopeKind,
}

/// The priority table. One row per [`ErrorKind`].
pub const PRIORITY_TABLE: &[(ErrorKind, PriorityEntry)] = &[
    (
        ErrorKind::AllFieldsMissing,
        PriorityEntry {
            tier: 5,
            scope: ScopeKind::Global,
        },
    ),
    (
        ErrorKind::FieldMissing,
        PriorityEntry {
            tier: 10,
            scope: ScopeKind::FieldSpecific,
        },
    ),
    (
        ErrorKind::FormatInvalid,
        PriorityEntry {
            tier: 15,
            scope: ScopeKind::FieldSpecific,
        },
    ),
    (
        ErrorKind::BusinessRuleViolated,
        PriorityEntry {
            tier: 20,
            scope: ScopeKind::Global,
        },
    ),
    (
        ErrorKind::FutureValueNotAllowed,
        PriorityEntry {
            tier: 25,
            scope: ScopeKind::Global,
        },
    ),
    (
        ErrorKind::Unchanged,
        PriorityEntry {
            tier: 30,
            scope: ScopeKind::Global,
        },
    ),
];

/// Resolve the tier and scope for a kind.
///
/// Falls back to [`FALLBACK_PRIORITY`] rather than dropping the error.
pub fn lookup(kind: ErrorKind) -> PriorityEntry {
    match PRIORITY_TABLE.iter().find(|(k, _)| *k == kind) {
        Some((_, entry)) => *entry,
        None => {
            tracing::warn!(kind = kind.as_str(), "Error kind missing from priority table");
            FALLBACK_PRIORITY
        }
    }
}

/// Resolve the tier and scope for a wire code.
///
/// Unrecognised codes resolve to [`FALLBACK_PRIORITY`].
pub fn lookup_code(code: &str) -> PriorityEntry {
    match ErrorKind::from_str_value(code) {
        Some(kind) => lookup(kind),
        None => {
            tracing::warn!(code, "Unrecognised error kind code, using fallback priority");
            FALLBACK_PRIORITY
        }
    }
}

/// Check that the table is total over [`ErrorKind`] with exactly one row per
/// kind and no two kinds sharing a tier.
///
/// Run once when the cluster registry is built.
pub fn verify_priority_table() -> Result<(), CoreError> {
    for kind in ErrorKind::ALL {
        let rows = PRIORITY_TABLE.iter().filter(|(k, _)| *k == kind).count();
        if rows != 1 {
            return Err(CoreError::InvalidDefinition(format!(
                "Priority table must have exactly one row for '{}', found {rows}",
                kind.as_str()
            )));
        }
    }

    for (i, (kind_a, entry_a)) in PRIORITY_TABLE.iter().enumerate() {
        for (kind_b, entry_b) in &PRIORITY_TABLE[i + 1..] {
            if entry_a.tier == entry_b.tier {
                return Err(CoreError::InvalidDefinition(format!(
                    "Priority tier {} is shared by '{}' and '{}'",
                    entry_a.tier,
                    kind_a.as_str(),
                    kind_b.as_str()
                )));
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_total_and_unique() {
        assert!(verify_priority_table().is_ok());
        assert_eq!(PRIORITY_TABLE.len(), ErrorKind::ALL.len());
    }

    #[test]
    fn all_lists_every_variant() {
        // Adding a variant without extending ALL fails to compile here.
        for kind in ErrorKind::ALL {
            match kind {
                ErrorKind::AllFieldsMissing
                | ErrorKind::FieldMissing
                | ErrorKind::FormatInvalid
                | ErrorKind::BusinessRuleViolated
                | ErrorKind::FutureValueNotAllowed
                | ErrorKind::Unchanged => {}
            }
        }
        assert_eq!(ErrorKind::ALL.len(), VALID_ERROR_KINDS.len());
    }

    #[test]
    fn tiers_match_documented_values() {
        assert_eq!(lookup(ErrorKind::AllFieldsMissing).tier, 5);
        assert_eq!(lookup(ErrorKind::FieldMissing).tier, 10);
        assert_eq!(lookup(ErrorKind::FormatInvalid).tier, 15);
        assert_eq!(lookup(ErrorKind::BusinessRuleViolated).tier, 20);
        assert_eq!(lookup(ErrorKind::FutureValueNotAllowed).tier, 25);
        assert_eq!(lookup(ErrorKind::Unchanged).tier, 30);
    }

    #[test]
    fn scopes_match_documented_values() {
        assert_eq!(lookup(ErrorKind::AllFieldsMissing).scope, ScopeKind::Global);
        assert_eq!(lookup(ErrorKind::FieldMissing).scope, ScopeKind::FieldSpecific);
        assert_eq!(lookup(ErrorKind::FormatInvalid).scope, ScopeKind::FieldSpecific);
        assert_eq!(lookup(ErrorKind::Unchanged).scope, ScopeKind::Global);
    }

    #[test]
    fn codes_round_trip() {
        for code in VALID_ERROR_KINDS {
            let kind = ErrorKind::from_str_value(code).unwrap();
            assert_eq!(kind.as_str(), *code);
        }
    }

    #[test]
    fn unknown_code_falls_back_to_format_invalid() {
        let entry = lookup_code("postcode_not_served");
        assert_eq!(entry, FALLBACK_PRIORITY);
        assert_eq!(entry.tier, lookup(ErrorKind::FormatInvalid).tier);
        assert_eq!(entry.scope, ScopeKind::FieldSpecific);
    }

    #[test]
    fn known_code_resolves_through_table() {
        assert_eq!(lookup_code("unchanged"), lookup(ErrorKind::Unchanged));
    }

    #[test]
    fn scope_serializes_with_field() {
        let json = serde_json::to_value(Scope::FieldSpecific("day".into())).unwrap();
        assert_eq!(json["type"], "field_specific");
        assert_eq!(json["field"], "day");
        let json = serde_json::to_value(Scope::Global).unwrap();
        assert_eq!(json["type"], "global");
    }
}
