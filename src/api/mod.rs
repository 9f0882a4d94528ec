//! HTTP API module for the Moving Quote Engine.
//!
//! This module provides the public REST endpoints (instant quote calculation
//! and lead submission from the quote form) and the operator endpoints for
//! working leads and editing pricing rules.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::QuoteCalculationRequest;
pub use response::{
    ApiError, ApiErrorResponse, LeadCreatedResponse, LeadListQuery, LeadStatusUpdate,
};
pub use state::AppState;
