//! Response types for the Moving Quote Engine API.
//!
//! This module defines the success bodies and the error response structures
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, ValidationError};
use crate::models::{LeadRecord, LeadStatus, QuoteBreakdown};

/// Body returned by `POST /leads` on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadCreatedResponse {
    /// Always `true`.
    pub success: bool,
    /// Identifier of the stored lead.
    pub lead_id: Uuid,
    /// Customer-facing quote reference.
    pub reference: String,
    /// The automatic estimate attached at intake.
    pub estimate: Option<QuoteBreakdown>,
}

impl From<&LeadRecord> for LeadCreatedResponse {
    fn from(record: &LeadRecord) -> Self {
        Self {
            success: true,
            lead_id: record.id,
            reference: record.reference(),
            estimate: record.estimate.clone(),
        }
    }
}

/// Body accepted by `PATCH /leads/{id}/status`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LeadStatusUpdate {
    /// The status to move the lead to.
    pub status: LeadStatus,
}

/// Query string accepted by `GET /leads`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LeadListQuery {
    /// Only return leads in this status.
    #[serde(default)]
    pub status: Option<LeadStatus>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a validation error naming the offending field in `details`.
    pub fn invalid_field(error: &ValidationError) -> Self {
        Self::with_details("VALIDATION_ERROR", error.to_string(), error.field.clone())
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ValidationError> for ApiErrorResponse {
    fn from(error: ValidationError) -> Self {
        ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::invalid_field(&error),
        }
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Validation(err) => err.into(),
            EngineError::Repository { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "LEAD_CREATE_FAILED",
                    "Failed to create lead",
                    message,
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidSetting { key, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid setting",
                    format!("{}: {}", key, message),
                ),
            },
            EngineError::InvalidPricingRule { name, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "PRICING_ERROR",
                    format!("Invalid pricing rule '{}'", name),
                    message,
                ),
            },
            err @ (EngineError::PricingSourceUnavailable { .. }
            | EngineError::EstimationFailure { .. }
            | EngineError::QuoteOverflow { .. }) => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "QUOTE_ERROR",
                    "Quote calculation failed",
                    err.to_string(),
                ),
            },
            err @ EngineError::LeadNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("LEAD_NOT_FOUND", err.to_string()),
            },
            err @ EngineError::InvalidStatusTransition { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("INVALID_STATUS_TRANSITION", err.to_string()),
            },
            err @ EngineError::PricingRuleNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("PRICING_RULE_NOT_FOUND", err.to_string()),
            },
            EngineError::Notification { channel, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "NOTIFICATION_FAILED",
                    format!("Failed to send {} notification", channel),
                    message,
                ),
            },
        }
    }
}
