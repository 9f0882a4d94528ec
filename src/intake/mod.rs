//! Lead intake for the public quote form.
//!
//! Validation lives in [`validate_lead`]; [`LeadIntakeService`] strings
//! validation, estimation, storage and notification together.

mod repository;
mod service;
mod validation;

pub use repository::{InMemoryLeadRepository, LeadRepository};
pub use service::LeadIntakeService;
pub use validation::{
    MIN_PHONE_DIGITS, RawLeadSubmission, is_valid_email, is_valid_zip, phone_digits,
    validate_lead,
};
