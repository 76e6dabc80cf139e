//! Maps selected violations to the inputs that get error styling.

use super::priority::Scope;
use super::rules::{ValidationResult, Violation};

/// Fields to highlight for a result. Never re-runs any rule.
pub fn highlight(result: &ValidationResult) -> Vec<String> {
    highlight_violations(&result.selected_violations)
}

/// Global violations highlight every field in the cluster, field-specific
/// ones only their field, consolidated ones exactly the merged fields.
pub fn highlight_violations(selected: &[Violation]) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for violation in selected {
        let targets: &[String] = match (&violation.scope, violation.consolidated) {
            (_, true) | (Scope::Global, false) => &violation.affected_fields,
            (Scope::FieldSpecific(field), false) => std::slice::from_ref(field),
        };
        for field in targets {
            if !fields.contains(field) {
                fields.push(field.clone());
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::priority::ErrorKind;

    fn violation(kind: ErrorKind, scope: Scope, affected: &[&str], consolidated: bool) -> Violation {
        Violation {
            kind,
            scope,
            tier: 0,
            evaluation_order: 0,
            affected_fields: affected.iter().map(|s| s.to_string()).collect(),
            summary_text: String::new(),
            inline_text: String::new(),
            consolidated,
        }
    }

    fn result(selected: Vec<Violation>) -> ValidationResult {
        ValidationResult {
            is_invalid: !selected.is_empty(),
            highlighted_fields: Vec::new(),
            selected_violations: selected,
        }
    }

    #[test]
    fn global_highlights_every_field() {
        let r = result(vec![violation(
            ErrorKind::BusinessRuleViolated,
            Scope::Global,
            &["day", "month", "year"],
            false,
        )]);
        assert_eq!(highlight(&r), vec!["day", "month", "year"]);
    }

    #[test]
    fn field_specific_highlights_only_that_field() {
        let r = result(vec![violation(
            ErrorKind::FormatInvalid,
            Scope::FieldSpecific("month".into()),
            &["month"],
            false,
        )]);
        assert_eq!(highlight(&r), vec!["month"]);
    }

    #[test]
    fn consolidated_highlights_merged_fields() {
        let r = result(vec![violation(
            ErrorKind::FieldMissing,
            Scope::FieldSpecific("month".into()),
            &["month", "year"],
            true,
        )]);
        assert_eq!(highlight(&r), vec!["month", "year"]);
    }

    #[test]
    fn valid_result_highlights_nothing() {
        assert!(highlight(&ValidationResult::valid()).is_empty());
    }

    #[test]
    fn highlighting_is_idempotent() {
        let r = result(vec![violation(
            ErrorKind::Unchanged,
            Scope::Global,
            &["phone_number", "safe_to_call"],
            false,
        )]);
        assert_eq!(highlight(&r), highlight(&r));
    }
}
