//! Configuration types.
//!
//! This module contains the strongly-typed configuration structures that are
//! deserialized from the pricing YAML file.

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::PricingRule;

/// Pricing configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// All known pricing rules, active or not.
    #[serde(default)]
    pub rules: Vec<PricingRule>,
}

impl PricingConfig {
    /// Returns the active rule, if any.
    pub fn active_rule(&self) -> Option<&PricingRule> {
        self.rules.iter().find(|rule| rule.is_active)
    }
}

/// Checks every rule's invariants and that at most one rule is active.
pub(crate) fn check_rules(rules: &[PricingRule]) -> EngineResult<()> {
    for rule in rules {
        rule.validate()?;
    }

    let active: Vec<&str> = rules
        .iter()
        .filter(|rule| rule.is_active)
        .map(|rule| rule.name.as_str())
        .collect();
    if active.len() > 1 {
        return Err(EngineError::InvalidPricingRule {
            name: active[1].to_string(),
            message: format!(
                "only one rule may be active (active: {})",
                active.join(", ")
            ),
        });
    }

    Ok(())
}
