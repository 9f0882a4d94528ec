//! Quote request and breakdown models.
//!
//! This module contains the [`QuoteRequest`] passed to the calculator and the
//! [`QuoteBreakdown`] it produces, plus the customer's optional [`Inventory`].

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::HomeSize;

/// The total quoted when a dependency fails and no estimate can be produced.
pub const FALLBACK_TOTAL_COST: &str = "500.00";

/// What the customer is moving.
///
/// Every part is optional on input and defaults to empty. Item names are
/// free-form; no check is made that rooms or items are known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    /// Items grouped by room name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: BTreeMap<String, BTreeSet<String>>,
    /// Appliances being moved.
    #[serde(default, deserialize_with = "null_as_default")]
    pub appliances: BTreeSet<String>,
    /// Items needing special handling (pianos, safes, artwork).
    #[serde(default, alias = "specialItems", deserialize_with = "null_as_default")]
    pub special_items: BTreeSet<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Inventory {
    /// Returns true if no rooms, appliances or special items were listed.
    pub fn is_empty(&self) -> bool {
        self.rooms.values().all(BTreeSet::is_empty)
            && self.appliances.is_empty()
            && self.special_items.is_empty()
    }
}

/// Input to a quote calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// 5-digit origin ZIP code.
    pub origin_zip: String,
    /// 5-digit destination ZIP code.
    pub destination_zip: String,
    /// The size of the home being moved.
    pub home_size: HomeSize,
    /// Optional inventory. Not used in pricing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Inventory>,
}

/// The computed cost estimate for a move.
///
/// All values are strings with exactly two decimal places, except in the
/// canned [`QuoteBreakdown::fallback`] result.
///
/// # Example
///
/// ```
/// use moving_quote_engine::models::QuoteBreakdown;
///
/// let fallback = QuoteBreakdown::fallback();
/// assert_eq!(fallback.total_cost, "500.00");
/// assert_eq!(fallback.base_cost, "0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteBreakdown {
    /// Estimated trip distance in miles.
    pub estimated_distance_miles: String,
    /// Flat per-move fee.
    pub base_cost: String,
    /// Distance component.
    pub distance_cost: String,
    /// Labor component.
    pub labor_cost: String,
    /// Total, clamped to the minimum charge.
    pub total_cost: String,
}

impl QuoteBreakdown {
    /// The canned result returned when pricing cannot be completed.
    pub fn fallback() -> Self {
        Self {
            estimated_distance_miles: "0".to_string(),
            base_cost: "0".to_string(),
            distance_cost: "0".to_string(),
            labor_cost: "0".to_string(),
            total_cost: FALLBACK_TOTAL_COST.to_string(),
        }
    }

    /// Returns true if this is the canned fallback result.
    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

/// Rounds to two decimal places, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Renders a value with exactly two decimal places.
///
/// # Example
///
/// ```
/// use moving_quote_engine::models::format_two_dp;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_two_dp(Decimal::from(150)), "150.00");
/// assert_eq!(format_two_dp(Decimal::new(12345, 3)), "12.35");
/// ```
pub fn format_two_dp(value: Decimal) -> String {
    let mut rounded = round_cents(value);
    rounded.rescale(2);
    rounded.to_string()
}
