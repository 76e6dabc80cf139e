//! Translates a [`ValidationResult`] into the error-summary / inline-error
//! view model the form templates consume.

use std::collections::BTreeMap;

use serde::Serialize;

use super::cluster::ClusterSpec;
use super::priority::Scope;
use super::rules::ValidationResult;

/// One entry in the page-level error summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorSummaryItem {
    pub text: String,
    /// Fragment link to the input or fieldset in error.
    pub href: String,
}

/// View model for one cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorViewModel {
    pub error_summary_list: Vec<ErrorSummaryItem>,
    /// Inline message per highlighted field. Empty string when the message
    /// belongs to the whole fieldset (see `cluster_error`).
    pub input_errors: BTreeMap<String, String>,
    /// Fieldset-level message for global and consolidated violations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_error: Option<String>,
    pub form_is_invalid: bool,
}

pub fn render(spec: &ClusterSpec, result: &ValidationResult) -> ErrorViewModel {
    let mut error_summary_list = Vec::with_capacity(result.selected_violations.len());
    let mut input_errors = BTreeMap::new();
    let mut cluster_error = None;

    for violation in &result.selected_violations {
        let href = match (&violation.scope, violation.consolidated) {
            (_, true) => violation
                .affected_fields
                .first()
                .map(|f| format!("#{f}"))
                .unwrap_or_else(|| format!("#{}", spec.anchor())),
            (Scope::FieldSpecific(field), false) => format!("#{field}"),
            (Scope::Global, false) => format!("#{}", spec.anchor()),
        };
        error_summary_list.push(ErrorSummaryItem {
            text: violation.summary_text.clone(),
            href,
        });

        match (&violation.scope, violation.consolidated) {
            (Scope::FieldSpecific(field), false) => {
                input_errors.insert(field.clone(), violation.inline_text.clone());
            }
            _ => {
                cluster_error = Some(violation.inline_text.clone());
            }
        }
    }

    for field in &result.highlighted_fields {
        input_errors.entry(field.clone()).or_default();
    }

    ErrorViewModel {
        error_summary_list,
        input_errors,
        cluster_error,
        form_is_invalid: result.is_invalid,
    }
}
