//! Pricing rule model.
//!
//! A pricing rule is the set of rate parameters used to compute a quote.
//! Operators edit rules through settings; the calculator only reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Rate parameters for pricing a move.
///
/// All monetary fields must be non-negative; see [`PricingRule::validate`].
///
/// # Example
///
/// ```
/// use moving_quote_engine::models::PricingRule;
/// use rust_decimal::Decimal;
///
/// let rule = PricingRule::default_rule();
/// assert_eq!(rule.base_cost_per_move, Decimal::from(150));
/// assert_eq!(rule.minimum_charge, Decimal::from(400));
/// assert!(rule.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRule {
    /// Display name of the rule.
    pub name: String,
    /// Optional operator notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Flat fee charged for every move.
    pub base_cost_per_move: Decimal,
    /// Charge per estimated mile travelled.
    pub cost_per_mile: Decimal,
    /// Charge per estimated labor hour.
    pub cost_per_labor_hour: Decimal,
    /// Lowest total the company will quote. Absent means no minimum.
    #[serde(default)]
    pub minimum_charge: Decimal,
    /// Whether this is the active rule.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl PricingRule {
    /// Name of the built-in rule used when nothing is configured.
    pub const DEFAULT_RULE_NAME: &'static str = "default";

    /// The built-in rule: $150 base, $2.50/mile, $60/labor hour, $400 minimum.
    pub fn default_rule() -> Self {
        Self {
            name: Self::DEFAULT_RULE_NAME.to_string(),
            description: None,
            base_cost_per_move: Decimal::new(150, 0),
            cost_per_mile: Decimal::new(250, 2),
            cost_per_labor_hour: Decimal::new(60, 0),
            minimum_charge: Decimal::new(400, 0),
            is_active: true,
        }
    }

    /// Checks that every monetary field is non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("base_cost_per_move", self.base_cost_per_move),
            ("cost_per_mile", self.cost_per_mile),
            ("cost_per_labor_hour", self.cost_per_labor_hour),
            ("minimum_charge", self.minimum_charge),
        ];

        match fields.iter().find(|(_, value)| value.is_sign_negative() && !value.is_zero()) {
            Some((field, value)) => Err(EngineError::InvalidPricingRule {
                name: self.name.clone(),
                message: format!("{} must not be negative (got {})", field, value),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_rule_values() {
        let rule = PricingRule::default_rule();
        assert_eq!(rule.name, "default");
        assert_eq!(rule.base_cost_per_move, dec("150"));
        assert_eq!(rule.cost_per_mile, dec("2.50"));
        assert_eq!(rule.cost_per_labor_hour, dec("60"));
        assert_eq!(rule.minimum_charge, dec("400"));
        assert!(rule.is_active);
    }

    #[test]
    fn test_negative_cost_per_mile_is_rejected() {
        let mut rule = PricingRule::default_rule();
        rule.cost_per_mile = dec("-1.00");

        match rule.validate() {
            Err(EngineError::InvalidPricingRule { name, message }) => {
                assert_eq!(name, "default");
                assert!(message.contains("cost_per_mile"));
            }
            other => panic!("Expected InvalidPricingRule, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_fields_are_valid() {
        let rule = PricingRule {
            name: "free".to_string(),
            description: None,
            base_cost_per_move: Decimal::ZERO,
            cost_per_mile: Decimal::ZERO,
            cost_per_labor_hour: Decimal::ZERO,
            minimum_charge: Decimal::ZERO,
            is_active: true,
        };
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn test_deserialize_without_minimum_charge_defaults_to_zero() {
        let yaml = r#"
name: Weekday
base_cost_per_move: "120.00"
cost_per_mile: "2.00"
cost_per_labor_hour: "55.00"
"#;
        let rule: PricingRule = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(rule.minimum_charge, Decimal::ZERO);
        assert!(rule.is_active);
        assert_eq!(rule.cost_per_mile, dec("2.00"));
    }
}
