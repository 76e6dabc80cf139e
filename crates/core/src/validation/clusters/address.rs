//! Postal address with a UK postcode. Address line 2 is optional.

use std::sync::LazyLock;

use crate::error::CoreError;
use crate::validation::cluster::{ClusterSpec, FieldSpec};
use crate::validation::priority::ErrorKind;

pub const CLUSTER_NAME: &str = "address";
pub const FIELD_LINE_1: &str = "address_line_1";
pub const FIELD_LINE_2: &str = "address_line_2";
pub const FIELD_TOWN: &str = "town";
pub const FIELD_POSTCODE: &str = "postcode";

/// Maximum length of a free-text address line.
pub const MAX_LINE_LENGTH: usize = 100;

/// UK postcode, case-insensitive, with or without the inner space.
static POSTCODE_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)^[A-Z]{1,2}[0-9][A-Z0-9]? ?[0-9][A-Z]{2}$").expect("valid regex")
});

pub fn definition() -> Result<ClusterSpec, CoreError> {
    ClusterSpec::builder(CLUSTER_NAME, "address")
        .field(FieldSpec::required(FIELD_LINE_1))
        .field(FieldSpec::optional(FIELD_LINE_2))
        .field(FieldSpec::required(FIELD_TOWN))
        .field(FieldSpec::required(FIELD_POSTCODE))
        .field_rule(
            FIELD_LINE_1,
            ErrorKind::FormatInvalid,
            "address.address_line_1.format",
            too_long,
        )
        .field_rule(
            FIELD_LINE_2,
            ErrorKind::FormatInvalid,
            "address.address_line_2.format",
            too_long,
        )
        .field_rule(FIELD_TOWN, ErrorKind::FormatInvalid, "address.town.format", too_long)
        .field_rule(
            FIELD_POSTCODE,
            ErrorKind::FormatInvalid,
            "address.postcode.format",
            invalid_postcode,
        )
        .detect_changes()
        .build()
}

fn too_long(value: &str) -> bool {
    value.chars().count() > MAX_LINE_LENGTH
}

fn invalid_postcode(value: &str) -> bool {
    !POSTCODE_RE.is_match(value)
}
