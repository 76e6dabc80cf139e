//! User-facing message lookup.
//!
//! The engine only needs `lookup(key, params) -> String`. A key with no
//! message resolves to the key itself so a missing translation never blanks
//! out an error.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::CoreError;

/// Regex matching `{placeholder}` tokens in message templates.
static PLACEHOLDER_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\{(\w+)\}").expect("valid regex"));

/// Resolves message keys to display text.
pub trait MessageLookup: Send + Sync {
    /// Look up `key` and substitute `{name}` placeholders from `params`.
    /// Returns `key` unchanged when no message exists.
    fn lookup(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// Built-in English copy.
const ENGLISH_MESSAGES: &[(&str, &str)] = &[
    // -- Date of birth --
    ("date_of_birth.day.label", "day"),
    ("date_of_birth.month.label", "month"),
    ("date_of_birth.year.label", "year"),
    ("date_of_birth.all_missing", "Enter your date of birth"),
    ("date_of_birth.day.missing", "Date of birth must include a day"),
    ("date_of_birth.month.missing", "Date of birth must include a month"),
    ("date_of_birth.year.missing", "Date of birth must include a year"),
    ("date_of_birth.missing_fields", "Date of birth must include a {fields}"),
    ("date_of_birth.day.format", "Day must be a number between 1 and 31"),
    ("date_of_birth.month.format", "Month must be a number between 1 and 12"),
    ("date_of_birth.year.format", "Year must include 4 numbers"),
    ("date_of_birth.not_real", "Date of birth must be a real date"),
    ("date_of_birth.future", "Date of birth must be in the past"),
    ("date_of_birth.unchanged", "The date of birth has not changed"),
    // -- Phone number --
    ("phone_number.phone_number.label", "a phone number"),
    ("phone_number.safe_to_call.label", "whether it is safe to call"),
    ("phone_number.all_missing", "Enter a phone number and whether it is safe to call"),
    ("phone_number.phone_number.missing", "Enter a phone number"),
    ("phone_number.safe_to_call.missing", "Select whether it is safe to call"),
    ("phone_number.missing_fields", "Enter {fields}"),
    (
        "phone_number.phone_number.format",
        "Enter a phone number, like 01632 960 001 or 07700 900 982",
    ),
    ("phone_number.safe_to_call.format", "Select yes or no"),
    ("phone_number.unchanged", "The phone number has not changed"),
    // -- Address --
    ("address.address_line_1.label", "address line 1"),
    ("address.address_line_2.label", "address line 2"),
    ("address.town.label", "town or city"),
    ("address.postcode.label", "postcode"),
    ("address.all_missing", "Enter an address"),
    (
        "address.address_line_1.missing",
        "Enter address line 1, typically the building and street",
    ),
    ("address.town.missing", "Enter town or city"),
    ("address.postcode.missing", "Enter postcode"),
    ("address.missing_fields", "Address must include {fields}"),
    (
        "address.address_line_1.format",
        "Address line 1 must be 100 characters or less",
    ),
    (
        "address.address_line_2.format",
        "Address line 2 must be 100 characters or less",
    ),
    ("address.town.format", "Town or city must be 100 characters or less"),
    ("address.postcode.format", "Enter a real postcode"),
    ("address.unchanged", "The address has not changed"),
    // -- Third-party contact --
    ("third_party_contact.contact_name.label", "name"),
    ("third_party_contact.relationship.label", "relationship"),
    ("third_party_contact.passphrase.label", "passphrase"),
    ("third_party_contact.all_missing", "Enter the third party's details"),
    (
        "third_party_contact.contact_name.missing",
        "Enter the third party's name",
    ),
    (
        "third_party_contact.relationship.missing",
        "Enter the third party's relationship to the claimant",
    ),
    ("third_party_contact.passphrase.missing", "Enter a passphrase"),
    (
        "third_party_contact.missing_fields",
        "Third party details must include a {fields}",
    ),
    (
        "third_party_contact.contact_name.format",
        "Name must be 100 characters or less",
    ),
    (
        "third_party_contact.relationship.format",
        "Relationship must be 100 characters or less",
    ),
    (
        "third_party_contact.passphrase.format",
        "Passphrase must be between 6 and 30 letters or numbers",
    ),
    (
        "third_party_contact.passphrase_matches_name",
        "Passphrase must not be the same as the third party's name",
    ),
    (
        "third_party_contact.unchanged",
        "The third party's details have not changed",
    ),
];

/// In-memory message catalog.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// The built-in English catalog.
    pub fn english() -> Self {
        Self {
            messages: ENGLISH_MESSAGES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// English catalog with the entries of a flat JSON object file laid over
    /// it (`{"date_of_birth.future": "..."}`).
    pub fn from_json_file(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Internal(format!(
                "Failed to read message catalog {}: {e}",
                path.display()
            ))
        })?;
        let overrides: HashMap<String, String> = serde_json::from_str(&raw).map_err(|e| {
            CoreError::InvalidDefinition(format!(
                "Message catalog {} is not a flat JSON object of strings: {e}",
                path.display()
            ))
        })?;
        tracing::info!(
            path = %path.display(),
            overrides = overrides.len(),
            "Loaded message catalog overrides"
        );
        Ok(Self::english().with_overrides(overrides))
    }

    pub fn with_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.messages.extend(overrides);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageLookup for MessageCatalog {
    fn lookup(&self, key: &str, params: &[(&str, &str)]) -> String {
        match self.messages.get(key) {
            Some(template) => interpolate(template, params),
            None => {
                tracing::debug!(key, "No message for key");
                key.to_string()
            }
        }
    }
}

/// Substitute `{name}` tokens. Unknown placeholders are left as written.
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &regex::Captures| {
            let name = &caps[1];
            match params.iter().find(|(k, _)| *k == name) {
                Some((_, value)) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .to_string()
}

/// Join labels as "a and b and c".
pub fn join_labels(labels: &[String]) -> String {
    labels.join(" and ")
}
