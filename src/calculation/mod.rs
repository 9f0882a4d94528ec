//! Calculation logic for the Moving Quote Engine.
//!
//! This module contains the quote calculator and its collaborators: the
//! pricing rule source and distance estimator seams, and the home-size to
//! labor-hours table.

mod distance;
mod labor_hours;
mod pricing_source;
mod quote_calculator;

pub use distance::{DistanceEstimator, FixedDistanceEstimator, RandomDistanceEstimator};
pub use labor_hours::{DEFAULT_LABOR_HOURS, labor_cost, labor_hours};
pub use pricing_source::PricingRuleSource;
pub use quote_calculator::{PricingBasis, QuoteCalculator, QuoteOutcome, price_quote};
