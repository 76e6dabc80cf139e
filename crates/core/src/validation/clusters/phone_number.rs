//! Phone number plus the "is it safe to call" answer.

use std::sync::LazyLock;

use crate::error::CoreError;
use crate::validation::cluster::{ClusterSpec, FieldSpec};
use crate::validation::priority::ErrorKind;

pub const CLUSTER_NAME: &str = "phone_number";
pub const FIELD_PHONE_NUMBER: &str = "phone_number";
pub const FIELD_SAFE_TO_CALL: &str = "safe_to_call";

/// Accepted answers for `safe_to_call`.
pub const SAFE_TO_CALL_YES: &str = "yes";
pub const SAFE_TO_CALL_NO: &str = "no";
pub const VALID_SAFE_TO_CALL: &[&str] = &[SAFE_TO_CALL_YES, SAFE_TO_CALL_NO];

pub const MIN_PHONE_DIGITS: usize = 10;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Digits and spaces with an optional leading `+`.
static PHONE_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^\+?[0-9][0-9 ]*$").expect("valid regex"));

pub fn definition() -> Result<ClusterSpec, CoreError> {
    ClusterSpec::builder(CLUSTER_NAME, "phone-number")
        .field(FieldSpec::required(FIELD_PHONE_NUMBER))
        .field(FieldSpec::required(FIELD_SAFE_TO_CALL))
        .field_rule(
            FIELD_PHONE_NUMBER,
            ErrorKind::FormatInvalid,
            "phone_number.phone_number.format",
            invalid_phone_number,
        )
        .field_rule(
            FIELD_SAFE_TO_CALL,
            ErrorKind::FormatInvalid,
            "phone_number.safe_to_call.format",
            invalid_safe_to_call,
        )
        .detect_changes()
        .build()
}

fn invalid_phone_number(value: &str) -> bool {
    if !PHONE_RE.is_match(value) {
        return true;
    }
    let digits = value.chars().filter(char::is_ascii_digit).count();
    !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

fn invalid_safe_to_call(value: &str) -> bool {
    !VALID_SAFE_TO_CALL.contains(&value.to_ascii_lowercase().as_str())
}
