//! Configuration loading and management for the Moving Quote Engine.
//!
//! Pricing rules are loaded from a YAML file into a [`PricingRuleStore`];
//! process settings come from the environment through [`AppConfig`].
//!
//! # Example
//!
//! ```no_run
//! use moving_quote_engine::config::{ConfigLoader, PricingRuleStore};
//!
//! let loader = ConfigLoader::load("./config/pricing.yaml").unwrap();
//! let store = PricingRuleStore::from_loader(loader);
//! println!("Loaded {} pricing rules", store.rules().unwrap().len());
//! ```

mod loader;
mod settings;
mod store;
mod types;

pub use loader::ConfigLoader;
pub use settings::{AppConfig, AppEnvironment, QuoteSettings, ServerConfig, TelemetryConfig};
pub use store::PricingRuleStore;
pub use types::PricingConfig;
