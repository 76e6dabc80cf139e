//! Date of birth: three text inputs forming one calendar date.

use chrono::NaiveDate;

use crate::error::CoreError;
use crate::validation::cluster::{Cluster, ClusterSpec, FieldSpec};
use crate::validation::priority::ErrorKind;

pub const CLUSTER_NAME: &str = "date_of_birth";
pub const FIELD_DAY: &str = "day";
pub const FIELD_MONTH: &str = "month";
pub const FIELD_YEAR: &str = "year";

pub fn definition() -> Result<ClusterSpec, CoreError> {
    ClusterSpec::builder(CLUSTER_NAME, "date-of-birth")
        .field(FieldSpec::required(FIELD_DAY))
        .field(FieldSpec::required(FIELD_MONTH))
        .field(FieldSpec::required(FIELD_YEAR))
        .field_rule(FIELD_DAY, ErrorKind::FormatInvalid, "date_of_birth.day.format", invalid_day)
        .field_rule(
            FIELD_MONTH,
            ErrorKind::FormatInvalid,
            "date_of_birth.month.format",
            invalid_month,
        )
        .field_rule(
            FIELD_YEAR,
            ErrorKind::FormatInvalid,
            "date_of_birth.year.format",
            invalid_year,
        )
        .global_rule(
            ErrorKind::BusinessRuleViolated,
            "date_of_birth.not_real",
            not_a_real_date,
        )
        .global_rule(
            ErrorKind::FutureValueNotAllowed,
            "date_of_birth.future",
            in_the_future,
        )
        .detect_changes()
        .build()
}

/// Parse a 1–2 digit number within `range`.
fn small_number(value: &str, range: std::ops::RangeInclusive<u32>) -> Option<u32> {
    if value.is_empty() || value.len() > 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok().filter(|n| range.contains(n))
}

fn invalid_day(value: &str) -> bool {
    small_number(value, 1..=31).is_none()
}

fn invalid_month(value: &str) -> bool {
    small_number(value, 1..=12).is_none()
}

fn invalid_year(value: &str) -> bool {
    value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit())
}

/// The submitted date, if all three parts form a real calendar date.
pub fn parse_date(cluster: &Cluster<'_>) -> Option<NaiveDate> {
    let day = small_number(cluster.value(FIELD_DAY), 1..=31)?;
    let month = small_number(cluster.value(FIELD_MONTH), 1..=12)?;
    let year_text = cluster.value(FIELD_YEAR);
    if invalid_year(year_text) {
        return None;
    }
    let year: i32 = year_text.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn not_a_real_date(cluster: &Cluster<'_>) -> bool {
    parse_date(cluster).is_none()
}

fn in_the_future(cluster: &Cluster<'_>) -> bool {
    parse_date(cluster).is_some_and(|date| date > cluster.reference_date())
}
