//! Cluster definitions used by the casework forms.

pub mod address;
pub mod date_of_birth;
pub mod phone_number;
pub mod third_party_contact;
