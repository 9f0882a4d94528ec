//! Error types for the Moving Quote Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while pricing moves and taking in leads.

use thiserror::Error;
use uuid::Uuid;

use crate::models::LeadStatus;

/// A lead-intake validation failure.
///
/// Carries the first field that failed validation and a human-readable reason.
/// Validation stops at the first failure, so only one field is ever reported.
///
/// # Example
///
/// ```
/// use moving_quote_engine::error::ValidationError;
///
/// let error = ValidationError::new("origin_zip", "must be exactly 5 digits");
/// assert_eq!(error.to_string(), "Invalid field 'origin_zip': must be exactly 5 digits");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid field '{field}': {reason}")]
pub struct ValidationError {
    /// The name of the field that failed validation.
    pub field: String,
    /// A description of why the field is invalid.
    pub reason: String,
}

impl ValidationError {
    /// Creates a new validation error for the given field.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// The main error type for the Moving Quote Engine.
///
/// # Example
///
/// ```
/// use moving_quote_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/pricing.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/pricing.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A pricing rule violated its invariants.
    #[error("Invalid pricing rule '{name}': {message}")]
    InvalidPricingRule {
        /// The name of the offending rule.
        name: String,
        /// A description of what made the rule invalid.
        message: String,
    },

    /// An environment setting could not be interpreted.
    #[error("Invalid setting '{key}': {message}")]
    InvalidSetting {
        /// The environment variable name.
        key: String,
        /// A description of the problem.
        message: String,
    },

    /// The pricing rule source could not be reached.
    #[error("Pricing rule source unavailable: {message}")]
    PricingSourceUnavailable {
        /// A description of the failure.
        message: String,
    },

    /// The distance estimator failed to produce a usable distance.
    #[error("Distance estimation failed for {origin_zip} -> {destination_zip}: {message}")]
    EstimationFailure {
        /// The origin ZIP code.
        origin_zip: String,
        /// The destination ZIP code.
        destination_zip: String,
        /// A description of the failure.
        message: String,
    },

    /// Pricing a move produced an amount too large to represent.
    #[error("Quote under pricing rule '{rule}' exceeds the representable amount")]
    QuoteOverflow {
        /// The name of the rule being applied.
        rule: String,
    },

    /// A lead submission failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The lead store rejected an operation.
    #[error("Lead repository error: {message}")]
    Repository {
        /// A description of the failure.
        message: String,
    },

    /// No lead exists with the requested id.
    #[error("Lead {id} not found")]
    LeadNotFound {
        /// The id that was looked up.
        id: Uuid,
    },

    /// A lead status change skipped a stage or reopened a closed lead.
    #[error("Lead {id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// The lead being updated.
        id: Uuid,
        /// The lead's current status.
        from: LeadStatus,
        /// The requested status.
        to: LeadStatus,
    },

    /// No pricing rule exists with the requested name.
    #[error("Pricing rule '{name}' not found")]
    PricingRuleNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// A notification could not be delivered.
    #[error("Failed to send {channel} notification: {message}")]
    Notification {
        /// The channel used (e.g. "email", "sms").
        channel: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
