//! Core data models for the Moving Quote Engine.
//!
//! This module contains the domain value objects shared by the calculator,
//! the lead-intake validator and the HTTP layer.

mod home_size;
mod lead;
mod pricing_rule;
mod quote;

pub use home_size::{HomeSize, UnknownHomeSize};
pub use lead::{LeadRecord, LeadStatus, LeadSubmission};
pub use pricing_rule::PricingRule;
pub use quote::{
    FALLBACK_TOTAL_COST, Inventory, QuoteBreakdown, QuoteRequest, format_two_dp, round_cents,
};
