//! Application state for the Moving Quote Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tracing::info;

use crate::calculation::{
    DistanceEstimator, FixedDistanceEstimator, QuoteCalculator, RandomDistanceEstimator,
};
use crate::config::{ConfigLoader, PricingRuleStore, QuoteSettings};
use crate::error::EngineResult;
use crate::intake::{InMemoryLeadRepository, LeadIntakeService};
use crate::notify::LogNotifier;

/// Shared application state.
///
/// Holds the intake service, which in turn owns the quote calculator, and the
/// pricing rule store that operators edit.
#[derive(Clone)]
pub struct AppState {
    intake: Arc<LeadIntakeService>,
    pricing: PricingRuleStore,
}

impl AppState {
    /// Creates a new application state.
    ///
    /// `pricing` should be the store the intake service's calculator reads,
    /// so rule edits take effect on the next quote.
    pub fn new(intake: LeadIntakeService, pricing: PricingRuleStore) -> Self {
        Self {
            intake: Arc::new(intake),
            pricing,
        }
    }

    /// Wires the production collaborators from settings.
    ///
    /// Pricing rules are seeded from the configured YAML file, if any. Leads
    /// are kept in memory and notifications are written to the log.
    pub fn from_settings(settings: &QuoteSettings) -> EngineResult<Self> {
        let store = match &settings.pricing_config {
            Some(path) => {
                let loader = ConfigLoader::load(path)?;
                info!(
                    path = %path.display(),
                    rules = loader.rules().len(),
                    active = loader.active_rule().map(|rule| rule.name.as_str()).unwrap_or("none"),
                    "Loaded pricing rules"
                );
                PricingRuleStore::from_loader(loader)
            }
            None => PricingRuleStore::empty(),
        };

        let distance: Arc<dyn DistanceEstimator> = match settings.fixed_distance_miles {
            Some(miles) => Arc::new(FixedDistanceEstimator::new(miles)),
            None => Arc::new(RandomDistanceEstimator::default()),
        };

        let calculator = QuoteCalculator::new(Arc::new(store.clone()), distance);
        Ok(Self::new(
            LeadIntakeService::new(
                calculator,
                Arc::new(InMemoryLeadRepository::default()),
                Arc::new(LogNotifier),
            ),
            store,
        ))
    }

    /// Returns the lead intake service.
    pub fn intake(&self) -> &LeadIntakeService {
        &self.intake
    }

    /// Returns the quote calculator.
    pub fn calculator(&self) -> &QuoteCalculator {
        self.intake.calculator()
    }

    /// Returns the pricing rule store.
    pub fn pricing(&self) -> &PricingRuleStore {
        &self.pricing
    }
}
