//! Move quote calculation.
//!
//! This module prices a move from the active pricing rule, an estimated trip
//! distance and the labor-hour table. Quoting never fails: a missing rule is
//! replaced by [`PricingRule::default_rule`], and any other dependency failure
//! produces the canned [`QuoteBreakdown::fallback`] so the public quote page
//! always has a number to show.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{HomeSize, PricingRule, QuoteBreakdown, QuoteRequest, format_two_dp, round_cents};

use super::distance::DistanceEstimator;
use super::labor_hours::labor_cost;
use super::pricing_source::PricingRuleSource;

/// Which rates produced a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "rule", rename_all = "snake_case")]
pub enum PricingBasis {
    /// The active configured rule, by name.
    Configured(String),
    /// No rule was available; the built-in default rule was used.
    Default,
    /// A dependency failed; the canned fallback was returned.
    Fallback,
}

/// A quote together with the basis it was priced on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteOutcome {
    /// The cost breakdown.
    pub breakdown: QuoteBreakdown,
    /// Where the rates came from.
    pub basis: PricingBasis,
}

/// Prices a move with a known rule and distance.
///
/// The distance is rounded to hundredths of a mile before it is multiplied,
/// and each component is rounded to cents before summing, so the rendered
/// components always add up to the rendered total unless the minimum charge
/// applies.
///
/// `estimated_miles` must be non-negative. Returns
/// [`EngineError::QuoteOverflow`] if a component or the subtotal does not fit
/// in a [`Decimal`].
///
/// # Examples
///
/// ```
/// use moving_quote_engine::calculation::price_quote;
/// use moving_quote_engine::models::{HomeSize, PricingRule};
/// use rust_decimal::Decimal;
///
/// let rule = PricingRule::default_rule();
/// let quote = price_quote(&rule, Decimal::from(40), HomeSize::TwoBed).unwrap();
///
/// // 150 + 40 × 2.50 + 6 × 60 = 610
/// assert_eq!(quote.estimated_distance_miles, "40.00");
/// assert_eq!(quote.distance_cost, "100.00");
/// assert_eq!(quote.labor_cost, "360.00");
/// assert_eq!(quote.total_cost, "610.00");
/// ```
pub fn price_quote(
    rule: &PricingRule,
    estimated_miles: Decimal,
    home_size: HomeSize,
) -> EngineResult<QuoteBreakdown> {
    let overflow = || EngineError::QuoteOverflow {
        rule: rule.name.clone(),
    };

    let miles = round_cents(estimated_miles);
    let base_cost = round_cents(rule.base_cost_per_move);
    let distance_cost = round_cents(
        miles
            .checked_mul(rule.cost_per_mile)
            .ok_or_else(overflow)?,
    );
    let labor_cost =
        round_cents(labor_cost(home_size, rule.cost_per_labor_hour).ok_or_else(overflow)?);
    let minimum_charge = round_cents(rule.minimum_charge);

    let subtotal = base_cost
        .checked_add(distance_cost)
        .and_then(|sum| sum.checked_add(labor_cost))
        .ok_or_else(overflow)?;
    let total_cost = subtotal.max(minimum_charge);

    Ok(QuoteBreakdown {
        estimated_distance_miles: format_two_dp(miles),
        base_cost: format_two_dp(base_cost),
        distance_cost: format_two_dp(distance_cost),
        labor_cost: format_two_dp(labor_cost),
        total_cost: format_two_dp(total_cost),
    })
}

/// Computes move quotes from injected pricing and distance sources.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use moving_quote_engine::calculation::{FixedDistanceEstimator, QuoteCalculator};
/// use moving_quote_engine::config::PricingRuleStore;
/// use moving_quote_engine::models::{HomeSize, QuoteRequest};
/// use rust_decimal::Decimal;
///
/// let calculator = QuoteCalculator::new(
///     Arc::new(PricingRuleStore::empty()),
///     Arc::new(FixedDistanceEstimator::new(Decimal::from(20))),
/// );
/// let request = QuoteRequest {
///     origin_zip: "10001".to_string(),
///     destination_zip: "10002".to_string(),
///     home_size: HomeSize::Studio,
///     inventory: None,
/// };
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let quote = runtime.block_on(calculator.calculate(&request));
///
/// // 150 + 50 + 180 = 380, raised to the 400 minimum
/// assert_eq!(quote.total_cost, "400.00");
/// ```
#[derive(Clone)]
pub struct QuoteCalculator {
    pricing: Arc<dyn PricingRuleSource>,
    distance: Arc<dyn DistanceEstimator>,
}

impl QuoteCalculator {
    /// Creates a calculator over the given sources.
    pub fn new(pricing: Arc<dyn PricingRuleSource>, distance: Arc<dyn DistanceEstimator>) -> Self {
        Self { pricing, distance }
    }

    /// Quotes a move. Never fails.
    pub async fn calculate(&self, request: &QuoteRequest) -> QuoteBreakdown {
        self.calculate_detailed(request).await.breakdown
    }

    /// Quotes a move and reports which rates were used. Never fails.
    pub async fn calculate_detailed(&self, request: &QuoteRequest) -> QuoteOutcome {
        match self.try_calculate(request).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(
                    error = %err,
                    origin_zip = %request.origin_zip,
                    destination_zip = %request.destination_zip,
                    "Quote calculation failed, returning fallback quote"
                );
                QuoteOutcome {
                    breakdown: QuoteBreakdown::fallback(),
                    basis: PricingBasis::Fallback,
                }
            }
        }
    }

    async fn try_calculate(&self, request: &QuoteRequest) -> EngineResult<QuoteOutcome> {
        let (rule, basis) = self.resolve_rule().await?;

        let miles = self
            .distance
            .estimate_miles(&request.origin_zip, &request.destination_zip)
            .await?;
        if miles.is_sign_negative() && !miles.is_zero() {
            return Err(EngineError::EstimationFailure {
                origin_zip: request.origin_zip.clone(),
                destination_zip: request.destination_zip.clone(),
                message: format!("negative distance {}", miles),
            });
        }

        debug!(
            rule = %rule.name,
            miles = %miles,
            home_size = %request.home_size,
            "Pricing quote"
        );

        Ok(QuoteOutcome {
            breakdown: price_quote(&rule, miles, request.home_size)?,
            basis,
        })
    }

    async fn resolve_rule(&self) -> EngineResult<(PricingRule, PricingBasis)> {
        match self.pricing.active_rule().await {
            Ok(Some(rule)) => {
                rule.validate()?;
                let basis = PricingBasis::Configured(rule.name.clone());
                Ok((rule, basis))
            }
            Ok(None) => Ok((PricingRule::default_rule(), PricingBasis::Default)),
            Err(err) => {
                warn!(error = %err, "Pricing rule lookup failed, using default rule");
                Ok((PricingRule::default_rule(), PricingBasis::Default))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::FixedDistanceEstimator;
    use async_trait::async_trait;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    struct StaticRule(Option<PricingRule>);

    #[async_trait]
    impl PricingRuleSource for StaticRule {
        async fn active_rule(&self) -> EngineResult<Option<PricingRule>> {
            Ok(self.0.clone())
        }
    }

    struct UnavailableRules;

    #[async_trait]
    impl PricingRuleSource for UnavailableRules {
        async fn active_rule(&self) -> EngineResult<Option<PricingRule>> {
            Err(EngineError::PricingSourceUnavailable {
                message: "database not available".to_string(),
            })
        }
    }

    struct BrokenEstimator;

    #[async_trait]
    impl DistanceEstimator for BrokenEstimator {
        async fn estimate_miles(&self, origin: &str, destination: &str) -> EngineResult<Decimal> {
            Err(EngineError::EstimationFailure {
                origin_zip: origin.to_string(),
                destination_zip: destination.to_string(),
                message: "geocoder down".to_string(),
            })
        }
    }

    fn request(home_size: HomeSize) -> QuoteRequest {
        QuoteRequest {
            origin_zip: "10001".to_string(),
            destination_zip: "90210".to_string(),
            home_size,
            inventory: None,
        }
    }

    fn calculator(source: impl PricingRuleSource + 'static, miles: &str) -> QuoteCalculator {
        QuoteCalculator::new(
            Arc::new(source),
            Arc::new(FixedDistanceEstimator::new(dec(miles))),
        )
    }

    fn custom_rule() -> PricingRule {
        PricingRule {
            name: "Spring 2026".to_string(),
            description: None,
            base_cost_per_move: dec("200.00"),
            cost_per_mile: dec("3.00"),
            cost_per_labor_hour: dec("75.00"),
            minimum_charge: dec("500.00"),
            is_active: true,
        }
    }

    /// QC-001: default rule, 2bed, 40 miles
    #[test]
    fn test_price_quote_default_rule_two_bed() {
        let quote = price_quote(&PricingRule::default_rule(), dec("40"), HomeSize::TwoBed).unwrap();

        assert_eq!(quote.estimated_distance_miles, "40.00");
        assert_eq!(quote.base_cost, "150.00");
        assert_eq!(quote.distance_cost, "100.00");
        assert_eq!(quote.labor_cost, "360.00");
        assert_eq!(quote.total_cost, "610.00");
    }

    /// QC-002: small move is clamped to the minimum charge
    #[test]
    fn test_price_quote_clamps_to_minimum() {
        let quote = price_quote(&PricingRule::default_rule(), dec("10"), HomeSize::Studio).unwrap();

        // 150 + 25 + 180 = 355 < 400
        assert_eq!(quote.base_cost, "150.00");
        assert_eq!(quote.distance_cost, "25.00");
        assert_eq!(quote.labor_cost, "180.00");
        assert_eq!(quote.total_cost, "400.00");
    }

    /// QC-003: fractional distance rounds before multiplying
    #[test]
    fn test_price_quote_rounds_distance_first() {
        let quote =
            price_quote(&PricingRule::default_rule(), dec("33.3333"), HomeSize::ThreeBed).unwrap();

        // 33.33 × 2.50 = 83.325 -> 83.33; 150 + 83.33 + 480 = 713.33
        assert_eq!(quote.estimated_distance_miles, "33.33");
        assert_eq!(quote.distance_cost, "83.33");
        assert_eq!(quote.labor_cost, "480.00");
        assert_eq!(quote.total_cost, "713.33");
    }

    #[test]
    fn test_price_quote_commercial_matches_five_bed() {
        let rule = PricingRule::default_rule();
        assert_eq!(
            price_quote(&rule, dec("25"), HomeSize::Commercial).unwrap(),
            price_quote(&rule, dec("25"), HomeSize::FiveBedPlus).unwrap()
        );
    }

    #[test]
    fn test_price_quote_reports_overflow() {
        let mut rule = PricingRule::default_rule();
        rule.cost_per_mile = Decimal::MAX;

        match price_quote(&rule, dec("40"), HomeSize::TwoBed) {
            Err(EngineError::QuoteOverflow { rule }) => {
                assert_eq!(rule, PricingRule::DEFAULT_RULE_NAME)
            }
            other => panic!("Expected QuoteOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_price_quote_reports_subtotal_overflow() {
        let mut rule = PricingRule::default_rule();
        rule.base_cost_per_move = Decimal::MAX;

        assert!(matches!(
            price_quote(&rule, dec("40"), HomeSize::TwoBed),
            Err(EngineError::QuoteOverflow { .. })
        ));
    }

    #[tokio::test]
    async fn test_calculate_uses_configured_rule() {
        let calc = calculator(StaticRule(Some(custom_rule())), "50");
        let outcome = calc.calculate_detailed(&request(HomeSize::OneBed)).await;

        // 200 + 150 + 300 = 650
        assert_eq!(outcome.breakdown.total_cost, "650.00");
        assert_eq!(outcome.basis, PricingBasis::Configured("Spring 2026".to_string()));
    }

    #[tokio::test]
    async fn test_calculate_without_rule_uses_defaults() {
        let calc = calculator(StaticRule(None), "40");
        let outcome = calc.calculate_detailed(&request(HomeSize::TwoBed)).await;

        assert_eq!(outcome.breakdown.total_cost, "610.00");
        assert_eq!(outcome.basis, PricingBasis::Default);
    }

    #[tokio::test]
    async fn test_unavailable_rule_source_uses_defaults() {
        let calc = calculator(UnavailableRules, "40");
        let outcome = calc.calculate_detailed(&request(HomeSize::TwoBed)).await;

        assert_eq!(outcome.breakdown.base_cost, "150.00");
        assert_eq!(outcome.breakdown.total_cost, "610.00");
        assert_eq!(outcome.basis, PricingBasis::Default);
    }

    #[tokio::test]
    async fn test_estimator_failure_returns_exact_fallback() {
        let calc = QuoteCalculator::new(Arc::new(StaticRule(None)), Arc::new(BrokenEstimator));
        let outcome = calc.calculate_detailed(&request(HomeSize::FourBed)).await;

        assert_eq!(outcome.breakdown, QuoteBreakdown::fallback());
        assert_eq!(outcome.breakdown.total_cost, "500.00");
        assert_eq!(outcome.basis, PricingBasis::Fallback);
    }

    #[tokio::test]
    async fn test_negative_distance_returns_fallback() {
        let calc = calculator(StaticRule(None), "-5");
        let quote = calc.calculate(&request(HomeSize::TwoBed)).await;
        assert!(quote.is_fallback());
    }

    #[tokio::test]
    async fn test_invalid_configured_rule_returns_fallback() {
        let mut rule = custom_rule();
        rule.cost_per_labor_hour = dec("-10");
        let calc = calculator(StaticRule(Some(rule)), "40");

        let quote = calc.calculate(&request(HomeSize::TwoBed)).await;
        assert!(quote.is_fallback());
    }

    #[tokio::test]
    async fn test_overflowing_rule_returns_fallback() {
        let mut rule = custom_rule();
        rule.cost_per_mile = Decimal::MAX;
        let calc = calculator(StaticRule(Some(rule)), "40");

        let outcome = calc.calculate_detailed(&request(HomeSize::TwoBed)).await;
        assert_eq!(outcome.breakdown, QuoteBreakdown::fallback());
        assert_eq!(outcome.basis, PricingBasis::Fallback);
    }

    #[tokio::test]
    async fn test_overflowing_labor_rate_returns_fallback() {
        let mut rule = custom_rule();
        rule.cost_per_labor_hour = Decimal::MAX;
        let calc = calculator(StaticRule(Some(rule)), "40");

        assert!(calc.calculate(&request(HomeSize::FiveBedPlus)).await.is_fallback());
    }

    #[tokio::test]
    async fn test_zero_distance_is_priced() {
        let calc = calculator(StaticRule(None), "0");
        let quote = calc.calculate(&request(HomeSize::FiveBedPlus)).await;

        // 150 + 0 + 720 = 870
        assert_eq!(quote.distance_cost, "0.00");
        assert_eq!(quote.total_cost, "870.00");
    }

    #[tokio::test]
    async fn test_larger_home_never_costs_less() {
        let calc = calculator(StaticRule(None), "30");
        let studio = calc.calculate(&request(HomeSize::Studio)).await;
        let five_bed = calc.calculate(&request(HomeSize::FiveBedPlus)).await;

        assert!(dec(&five_bed.total_cost) > dec(&studio.total_cost));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn money() -> impl Strategy<Value = Decimal> {
            (0i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
        }

        fn rule() -> impl Strategy<Value = PricingRule> {
            (money(), money(), money(), money()).prop_map(|(base, mile, hour, minimum)| {
                PricingRule {
                    name: "generated".to_string(),
                    description: None,
                    base_cost_per_move: base,
                    cost_per_mile: mile,
                    cost_per_labor_hour: hour,
                    minimum_charge: minimum,
                    is_active: true,
                }
            })
        }

        fn miles() -> impl Strategy<Value = Decimal> {
            (0i64..10_000_000).prop_map(|ten_thousandths| Decimal::new(ten_thousandths, 4))
        }

        fn home_size() -> impl Strategy<Value = HomeSize> {
            (0usize..HomeSize::ALL.len()).prop_map(|i| HomeSize::ALL[i])
        }

        fn two_dp(value: &str) -> bool {
            matches!(value.split_once('.'), Some((_, fraction)) if fraction.len() == 2)
        }

        proptest! {
            #[test]
            fn labor_cost_never_decreases_with_home_size(
                rule in rule(),
                miles in miles(),
                i in 0usize..7,
                j in 0usize..7,
            ) {
                let (small, large) = (i.min(j), i.max(j));
                let smaller = price_quote(&rule, miles, HomeSize::ALL[small]).unwrap();
                let larger = price_quote(&rule, miles, HomeSize::ALL[large]).unwrap();
                prop_assert!(dec(&larger.labor_cost) >= dec(&smaller.labor_cost));
            }

            #[test]
            fn total_is_at_least_minimum_charge(
                rule in rule(),
                miles in miles(),
                size in home_size(),
            ) {
                let quote = price_quote(&rule, miles, size).unwrap();
                prop_assert!(dec(&quote.total_cost) >= rule.minimum_charge);
            }

            #[test]
            fn total_is_sum_or_minimum(
                rule in rule(),
                miles in miles(),
                size in home_size(),
            ) {
                let quote = price_quote(&rule, miles, size).unwrap();
                let sum = dec(&quote.base_cost) + dec(&quote.distance_cost) + dec(&quote.labor_cost);
                if sum >= rule.minimum_charge {
                    prop_assert_eq!(dec(&quote.total_cost), sum);
                } else {
                    prop_assert_eq!(dec(&quote.total_cost), rule.minimum_charge);
                }
            }

            #[test]
            fn money_fields_are_non_negative_with_two_decimals(
                rule in rule(),
                miles in miles(),
                size in home_size(),
            ) {
                let quote = price_quote(&rule, miles, size).unwrap();
                for value in [
                    &quote.estimated_distance_miles,
                    &quote.base_cost,
                    &quote.distance_cost,
                    &quote.labor_cost,
                    &quote.total_cost,
                ] {
                    prop_assert!(two_dp(value), "not two decimals: {}", value);
                    prop_assert!(!dec(value).is_sign_negative() || dec(value).is_zero());
                }
            }
        }
    }
}
