//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pricing rules
//! from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::PricingRule;

use super::types::{PricingConfig, check_rules};

/// Loads and provides access to pricing configuration.
///
/// # File Structure
///
/// ```text
/// rules:
///   - name: Standard
///     base_cost_per_move: "150.00"
///     cost_per_mile: "2.50"
///     cost_per_labor_hour: "60.00"
///     minimum_charge: "400.00"
///     is_active: true
/// ```
///
/// # Example
///
/// ```no_run
/// use moving_quote_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/pricing.yaml").unwrap();
/// if let Some(rule) = loader.active_rule() {
///     println!("Active rule: {}", rule.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PricingConfig,
}

impl ConfigLoader {
    /// Loads pricing rules from the specified YAML file.
    ///
    /// Returns an error if:
    /// - The file is missing
    /// - The file contains invalid YAML or a malformed rule
    /// - A rule has a negative monetary field
    /// - More than one rule is active
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config = Self::load_yaml::<PricingConfig>(path.as_ref())?;
        check_rules(&config.rules)?;
        Ok(Self { config })
    }

    /// Parses pricing rules from YAML text.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let config: PricingConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        check_rules(&config.rules)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns every configured rule.
    pub fn rules(&self) -> &[PricingRule] {
        &self.config.rules
    }

    /// Returns the active rule, if one is configured.
    pub fn active_rule(&self) -> Option<&PricingRule> {
        self.config.active_rule()
    }

    /// Consumes the loader, returning the rules.
    pub fn into_rules(self) -> Vec<PricingRule> {
        self.config.rules
    }
}
