//! Pricing rule lookup.

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::models::PricingRule;

/// Supplies the currently active [`PricingRule`].
///
/// `Ok(None)` means no rule has been configured. An `Err` means the source
/// itself could not be consulted; the calculator treats both the same way and
/// prices with [`PricingRule::default_rule`].
#[async_trait]
pub trait PricingRuleSource: Send + Sync {
    /// Returns the active rule, if any.
    async fn active_rule(&self) -> EngineResult<Option<PricingRule>>;
}
