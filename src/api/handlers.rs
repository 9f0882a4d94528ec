//! HTTP request handlers for the Moving Quote Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::PricingBasis;
use crate::error::EngineError;
use crate::intake::RawLeadSubmission;
use crate::models::PricingRule;

use super::request::QuoteCalculationRequest;
use super::response::{
    ApiError, ApiErrorResponse, LeadCreatedResponse, LeadListQuery, LeadStatusUpdate,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
///
/// The lead and pricing routes below `/leads` and `/pricing` carry no access
/// control of their own and must sit behind the operator's authenticating
/// proxy.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/quote/calculate", post(calculate_quote_handler))
        .route("/leads", post(create_lead_handler).get(list_leads_handler))
        .route("/leads/:id", get(get_lead_handler))
        .route("/leads/:id/status", patch(update_lead_status_handler))
        .route(
            "/pricing/rules",
            get(list_pricing_rules_handler).put(save_pricing_rule_handler),
        )
        .route(
            "/pricing/rules/deactivate",
            post(deactivate_pricing_rules_handler),
        )
        .route(
            "/pricing/rules/:name/activate",
            post(activate_pricing_rule_handler),
        )
        .with_state(state)
}

/// Maps a body extraction failure to an API error.
///
/// A missing required field counts as a validation error; anything else the
/// body parser rejects is malformed JSON.
fn rejection_to_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

fn engine_failure(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    error_response(err.into())
}

fn bad_parameter(
    correlation_id: Uuid,
    parameter: &str,
    message: impl Into<String>,
) -> Response {
    let message = message.into();
    warn!(
        correlation_id = %correlation_id,
        parameter,
        error = %message,
        "Invalid request parameter"
    );
    json_response(
        StatusCode::BAD_REQUEST,
        ApiError::with_details("VALIDATION_ERROR", message, parameter),
    )
}

fn path_error(correlation_id: Uuid, parameter: &str, rejection: PathRejection) -> Response {
    bad_parameter(correlation_id, parameter, rejection.body_text())
}

/// Handler for POST /quote/calculate.
///
/// Always answers 200 with a breakdown once the input is valid; dependency
/// failures surface as the canned fallback quote, never as an error.
async fn calculate_quote_handler(
    State(state): State<AppState>,
    payload: Result<Json<QuoteCalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing quote request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_to_error(correlation_id, rejection),
            );
        }
    };

    let quote_request = match request.into_quote_request() {
        Ok(quote_request) => quote_request,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                field = %err.field,
                "Quote request rejected"
            );
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let outcome = state.calculator().calculate_detailed(&quote_request).await;
    let duration = start_time.elapsed();

    let basis = match &outcome.basis {
        PricingBasis::Configured(name) => name.as_str(),
        PricingBasis::Default => "default",
        PricingBasis::Fallback => "fallback",
    };
    info!(
        correlation_id = %correlation_id,
        home_size = %quote_request.home_size,
        basis,
        total_cost = %outcome.breakdown.total_cost,
        duration_us = duration.as_micros(),
        "Quote calculated"
    );

    json_response(StatusCode::OK, outcome.breakdown)
}

/// Handler for POST /leads.
///
/// Validates and stores a public quote-form submission with an automatic
/// estimate attached.
async fn create_lead_handler(
    State(state): State<AppState>,
    payload: Result<Json<RawLeadSubmission>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing lead submission");

    let raw = match payload {
        Ok(Json(raw)) => raw,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_to_error(correlation_id, rejection),
            );
        }
    };

    let start_time = Instant::now();
    match state.intake().submit(raw).await {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                lead_id = %record.id,
                duration_us = start_time.elapsed().as_micros(),
                "Lead created"
            );
            json_response(StatusCode::CREATED, LeadCreatedResponse::from(&record))
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Lead submission failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for GET /leads.
///
/// Lists stored leads newest first, optionally filtered by `?status=`.
async fn list_leads_handler(
    State(state): State<AppState>,
    query: Result<Query<LeadListQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return bad_parameter(correlation_id, "status", rejection.body_text()),
    };

    match state.intake().list(query.status) {
        Ok(leads) => {
            info!(
                correlation_id = %correlation_id,
                status = ?query.status,
                count = leads.len(),
                "Leads listed"
            );
            json_response(StatusCode::OK, leads)
        }
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for GET /leads/{id}.
async fn get_lead_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_error(correlation_id, "id", rejection),
    };

    match state.intake().get(&id) {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for PATCH /leads/{id}/status.
///
/// Moves a lead one step along the pipeline. Skipping a stage or reopening a
/// closed lead answers 409.
async fn update_lead_status_handler(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<LeadStatusUpdate>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return path_error(correlation_id, "id", rejection),
    };
    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_to_error(correlation_id, rejection),
            );
        }
    };

    match state.intake().update_status(&id, update.status) {
        Ok(record) => json_response(StatusCode::OK, record),
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for GET /pricing/rules.
async fn list_pricing_rules_handler(State(state): State<AppState>) -> Response {
    match state.pricing().rules() {
        Ok(rules) => json_response(StatusCode::OK, rules),
        Err(err) => engine_failure(Uuid::new_v4(), err),
    }
}

/// Handler for PUT /pricing/rules.
///
/// Creates or replaces the rule with the body's name. Saving an active rule
/// deactivates every other rule.
async fn save_pricing_rule_handler(
    State(state): State<AppState>,
    payload: Result<Json<PricingRule>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let rule = match payload {
        Ok(Json(rule)) => rule,
        Err(rejection) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                rejection_to_error(correlation_id, rejection),
            );
        }
    };

    match state.pricing().upsert(rule) {
        Ok(saved) => json_response(StatusCode::OK, saved),
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for POST /pricing/rules/{name}/activate.
async fn activate_pricing_rule_handler(
    State(state): State<AppState>,
    name: Result<Path<String>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let Path(name) = match name {
        Ok(name) => name,
        Err(rejection) => return path_error(correlation_id, "name", rejection),
    };

    match state.pricing().activate(&name) {
        Ok(rule) => json_response(StatusCode::OK, rule),
        Err(err) => engine_failure(correlation_id, err),
    }
}

/// Handler for POST /pricing/rules/deactivate.
///
/// Leaves no rule active, so quotes use the built-in default rule.
async fn deactivate_pricing_rules_handler(State(state): State<AppState>) -> Response {
    match state.pricing().deactivate_all() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => engine_failure(Uuid::new_v4(), err),
    }
}
