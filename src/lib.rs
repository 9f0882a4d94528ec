//! Moving Quote Engine
//!
//! This crate prices residential and commercial moves from a configurable rate
//! table and a trip-distance estimate, and takes in leads from the public quote
//! form: validating them, attaching an automatic estimate, storing them and
//! notifying the owner and the customer.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod intake;
pub mod models;
pub mod notify;
pub mod telemetry;
