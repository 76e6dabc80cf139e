//! Third party allowed to speak for the claimant, with a security passphrase.

use crate::error::CoreError;
use crate::validation::cluster::{Cluster, ClusterSpec, FieldSpec};
use crate::validation::priority::ErrorKind;

pub const CLUSTER_NAME: &str = "third_party_contact";
pub const FIELD_CONTACT_NAME: &str = "contact_name";
pub const FIELD_RELATIONSHIP: &str = "relationship";
pub const FIELD_PASSPHRASE: &str = "passphrase";

pub const MAX_TEXT_LENGTH: usize = 100;
pub const MIN_PASSPHRASE_LENGTH: usize = 6;
pub const MAX_PASSPHRASE_LENGTH: usize = 30;

pub fn definition() -> Result<ClusterSpec, CoreError> {
    ClusterSpec::builder(CLUSTER_NAME, "third-party-contact")
        .field(FieldSpec::required(FIELD_CONTACT_NAME))
        .field(FieldSpec::required(FIELD_RELATIONSHIP))
        .field(FieldSpec::required(FIELD_PASSPHRASE))
        .field_rule(
            FIELD_CONTACT_NAME,
            ErrorKind::FormatInvalid,
            "third_party_contact.contact_name.format",
            too_long,
        )
        .field_rule(
            FIELD_RELATIONSHIP,
            ErrorKind::FormatInvalid,
            "third_party_contact.relationship.format",
            too_long,
        )
        .field_rule(
            FIELD_PASSPHRASE,
            ErrorKind::FormatInvalid,
            "third_party_contact.passphrase.format",
            invalid_passphrase,
        )
        .global_rule(
            ErrorKind::BusinessRuleViolated,
            "third_party_contact.passphrase_matches_name",
            passphrase_matches_name,
        )
        .detect_changes()
        .build()
}

fn too_long(value: &str) -> bool {
    value.chars().count() > MAX_TEXT_LENGTH
}

fn invalid_passphrase(value: &str) -> bool {
    let len = value.chars().count();
    !(MIN_PASSPHRASE_LENGTH..=MAX_PASSPHRASE_LENGTH).contains(&len)
        || !value.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Compares with spaces removed so "Jo Bloggs" matches "jobloggs".
fn passphrase_matches_name(cluster: &Cluster<'_>) -> bool {
    let squash = |s: &str| -> String {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    };
    squash(cluster.value(FIELD_PASSPHRASE)) == squash(cluster.value(FIELD_CONTACT_NAME))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::validation::cluster::FieldMap;

    fn cluster_matches(name: &str, passphrase: &str) -> bool {
        let spec = definition().unwrap();
        let submitted: FieldMap = [
            (FIELD_CONTACT_NAME, name),
            (FIELD_RELATIONSHIP, "Sister"),
            (FIELD_PASSPHRASE, passphrase),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        passphrase_matches_name(&Cluster::new(&spec, &submitted, &FieldMap::new(), today))
    }

    #[test]
    fn passphrase_format() {
        assert!(!invalid_passphrase("Kettle42"));
        assert!(invalid_passphrase("abc"));
        assert!(invalid_passphrase("has spaces in"));
        assert!(invalid_passphrase(&"a".repeat(MAX_PASSPHRASE_LENGTH + 1)));
    }

    #[test]
    fn passphrase_must_differ_from_name() {
        assert!(cluster_matches("Jo Bloggs", "jobloggs"));
        assert!(cluster_matches("Jo Bloggs", "JOBLOGGS"));
        assert!(!cluster_matches("Jo Bloggs", "Kettle42"));
    }
}
