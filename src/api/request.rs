//! Request types for the Moving Quote Engine API.
//!
//! The lead endpoint takes [`crate::intake::RawLeadSubmission`] directly; this
//! module holds the body of the `/quote/calculate` endpoint.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::intake::is_valid_zip;
use crate::models::{HomeSize, Inventory, QuoteRequest};

/// Request body for the `/quote/calculate` endpoint.
///
/// `home_size` is kept as text so an unknown value is reported as a
/// validation error on that field rather than as unparseable JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteCalculationRequest {
    /// 5-digit origin ZIP code.
    pub origin_zip: String,
    /// 5-digit destination ZIP code.
    pub destination_zip: String,
    /// Home size wire name, e.g. `"2bed"`.
    pub home_size: String,
    /// Optional inventory; accepted but not priced.
    #[serde(default)]
    pub inventory: Option<Inventory>,
}

impl QuoteCalculationRequest {
    /// Checks the ZIP codes and home size, producing a calculator input.
    pub fn into_quote_request(self) -> Result<QuoteRequest, ValidationError> {
        if !is_valid_zip(&self.origin_zip) {
            return Err(ValidationError::new("origin_zip", "must be exactly 5 digits"));
        }
        if !is_valid_zip(&self.destination_zip) {
            return Err(ValidationError::new(
                "destination_zip",
                "must be exactly 5 digits",
            ));
        }
        let home_size = self
            .home_size
            .parse::<HomeSize>()
            .map_err(|err| ValidationError::new("home_size", err.to_string()))?;

        Ok(QuoteRequest {
            origin_zip: self.origin_zip,
            destination_zip: self.destination_zip,
            home_size,
            inventory: self.inventory,
        })
    }
}
