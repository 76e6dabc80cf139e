//! Casework form validation engine.
//!
//! Pure-logic validation for multi-field form clusters (date of birth,
//! phone number, address, third-party contact). No HTTP, session or storage
//! dependencies; callers hand in the submitted and baseline values and get
//! back a render-ready view model.

pub mod error;
pub mod validation;
