//! In-memory pricing rule store.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::info;

use crate::calculation::PricingRuleSource;
use crate::error::{EngineError, EngineResult};
use crate::models::PricingRule;

use super::loader::ConfigLoader;
use super::types::check_rules;

/// Holds the operator's pricing rules and serves the active one.
///
/// At most one rule is active at a time. Activating or saving an active rule
/// deactivates every other rule.
#[derive(Debug, Clone, Default)]
pub struct PricingRuleStore {
    rules: Arc<RwLock<Vec<PricingRule>>>,
}

fn unavailable() -> EngineError {
    EngineError::PricingSourceUnavailable {
        message: "pricing rule store lock poisoned".to_string(),
    }
}

impl PricingRuleStore {
    /// Creates a store with no rules; quotes use the built-in default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `rules`.
    ///
    /// Fails if any rule is invalid or more than one is active.
    pub fn new(rules: Vec<PricingRule>) -> EngineResult<Self> {
        check_rules(&rules)?;
        Ok(Self {
            rules: Arc::new(RwLock::new(rules)),
        })
    }

    /// Creates a store seeded from a loaded configuration file.
    pub fn from_loader(loader: ConfigLoader) -> Self {
        Self {
            rules: Arc::new(RwLock::new(loader.into_rules())),
        }
    }

    /// Returns a snapshot of every rule.
    pub fn rules(&self) -> EngineResult<Vec<PricingRule>> {
        Ok(self.rules.read().map_err(|_| unavailable())?.clone())
    }

    /// Inserts or replaces the rule with the same name, returning it.
    pub fn upsert(&self, rule: PricingRule) -> EngineResult<PricingRule> {
        rule.validate()?;
        let mut guard = self.rules.write().map_err(|_| unavailable())?;

        if rule.is_active {
            for existing in guard.iter_mut() {
                existing.is_active = false;
            }
        }

        info!(rule = %rule.name, active = rule.is_active, "Pricing rule saved");
        match guard.iter_mut().find(|existing| existing.name == rule.name) {
            Some(existing) => *existing = rule.clone(),
            None => guard.push(rule.clone()),
        }
        Ok(rule)
    }

    /// Makes `name` the only active rule, returning it.
    pub fn activate(&self, name: &str) -> EngineResult<PricingRule> {
        let mut guard = self.rules.write().map_err(|_| unavailable())?;
        let Some(index) = guard.iter().position(|rule| rule.name == name) else {
            return Err(EngineError::PricingRuleNotFound {
                name: name.to_string(),
            });
        };

        for (i, rule) in guard.iter_mut().enumerate() {
            rule.is_active = i == index;
        }
        info!(rule = %name, "Pricing rule activated");
        Ok(guard[index].clone())
    }

    /// Deactivates every rule so quotes fall back to the built-in default.
    pub fn deactivate_all(&self) -> EngineResult<()> {
        let mut guard = self.rules.write().map_err(|_| unavailable())?;
        for rule in guard.iter_mut() {
            rule.is_active = false;
        }
        info!("All pricing rules deactivated");
        Ok(())
    }
}

#[async_trait]
impl PricingRuleSource for PricingRuleStore {
    async fn active_rule(&self) -> EngineResult<Option<PricingRule>> {
        let guard = self.rules.read().map_err(|_| unavailable())?;
        Ok(guard.iter().find(|rule| rule.is_active).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn rule(name: &str, active: bool) -> PricingRule {
        PricingRule {
            name: name.to_string(),
            is_active: active,
            ..PricingRule::default_rule()
        }
    }

    #[tokio::test]
    async fn test_empty_store_has_no_active_rule() {
        let store = PricingRuleStore::empty();
        assert_eq!(store.active_rule().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_seeded_store_serves_active_rule() {
        let store = PricingRuleStore::new(vec![rule("A", false), rule("B", true)]).unwrap();
        assert_eq!(store.active_rule().await.unwrap().unwrap().name, "B");
    }

    #[test]
    fn test_new_rejects_two_active_rules() {
        let result = PricingRuleStore::new(vec![rule("A", true), rule("B", true)]);
        assert!(matches!(result, Err(EngineError::InvalidPricingRule { .. })));
    }

    #[tokio::test]
    async fn test_upsert_active_rule_deactivates_others() {
        let store = PricingRuleStore::new(vec![rule("A", true)]).unwrap();
        store.upsert(rule("B", true)).unwrap();

        let rules = store.rules().unwrap();
        assert_eq!(rules.iter().filter(|r| r.is_active).count(), 1);
        assert_eq!(store.active_rule().await.unwrap().unwrap().name, "B");
    }

    #[test]
    fn test_upsert_replaces_by_name() {
        let store = PricingRuleStore::new(vec![rule("A", true)]).unwrap();
        let mut updated = rule("A", true);
        updated.cost_per_mile = Decimal::new(300, 2);
        store.upsert(updated).unwrap();

        let rules = store.rules().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].cost_per_mile, Decimal::new(300, 2));
    }

    #[test]
    fn test_upsert_rejects_negative_rule() {
        let store = PricingRuleStore::empty();
        let mut bad = rule("Bad", true);
        bad.base_cost_per_move = Decimal::from(-5);

        assert!(store.upsert(bad).is_err());
        assert!(store.rules().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_activate_and_deactivate() {
        let store = PricingRuleStore::new(vec![rule("A", true), rule("B", false)]).unwrap();

        assert_eq!(store.activate("B").unwrap().name, "B");
        assert_eq!(store.active_rule().await.unwrap().unwrap().name, "B");

        assert!(matches!(
            store.activate("missing"),
            Err(EngineError::PricingRuleNotFound { .. })
        ));

        store.deactivate_all().unwrap();
        assert_eq!(store.active_rule().await.unwrap(), None);
    }
}
