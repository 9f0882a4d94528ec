//! Trip distance estimation.
//!
//! The calculator asks a [`DistanceEstimator`] for the miles between two ZIP
//! codes. No geocoding integration exists yet: [`RandomDistanceEstimator`]
//! stands in for one, and [`FixedDistanceEstimator`] gives deterministic
//! results for tests and demos.

use async_trait::async_trait;
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};

/// Estimates the distance in miles between an origin and destination ZIP code.
#[async_trait]
pub trait DistanceEstimator: Send + Sync {
    /// Returns the estimated trip distance in miles.
    async fn estimate_miles(&self, origin_zip: &str, destination_zip: &str)
    -> EngineResult<Decimal>;
}

/// Placeholder estimator returning a uniformly random distance.
///
/// Distances are drawn from `[min_miles, max_miles)` with cent precision and
/// do not depend on the ZIP codes.
#[derive(Debug, Clone)]
pub struct RandomDistanceEstimator {
    min_miles: Decimal,
    max_miles: Decimal,
}

impl RandomDistanceEstimator {
    /// Creates an estimator drawing from the given range.
    pub fn new(min_miles: Decimal, max_miles: Decimal) -> Self {
        Self {
            min_miles,
            max_miles,
        }
    }
}

impl Default for RandomDistanceEstimator {
    /// 10 to 60 miles.
    fn default() -> Self {
        Self::new(Decimal::from(10), Decimal::from(60))
    }
}

#[async_trait]
impl DistanceEstimator for RandomDistanceEstimator {
    async fn estimate_miles(
        &self,
        origin_zip: &str,
        destination_zip: &str,
    ) -> EngineResult<Decimal> {
        if self.max_miles <= self.min_miles {
            return Err(EngineError::EstimationFailure {
                origin_zip: origin_zip.to_string(),
                destination_zip: destination_zip.to_string(),
                message: format!(
                    "empty distance range {}..{}",
                    self.min_miles, self.max_miles
                ),
            });
        }

        // Work in hundredths of a mile so the draw stays in decimal space.
        let span = ((self.max_miles - self.min_miles) * Decimal::from(100)).trunc();
        let span = span.to_u64().unwrap_or(u64::MAX).max(1);
        let offset = rand::thread_rng().gen_range(0..span);

        Ok(self.min_miles + Decimal::new(offset as i64, 2))
    }
}

/// Estimator that always returns the same distance.
#[derive(Debug, Clone, Copy)]
pub struct FixedDistanceEstimator {
    miles: Decimal,
}

impl FixedDistanceEstimator {
    /// Creates an estimator that always reports `miles`.
    pub fn new(miles: Decimal) -> Self {
        Self { miles }
    }
}

#[async_trait]
impl DistanceEstimator for FixedDistanceEstimator {
    async fn estimate_miles(
        &self,
        _origin_zip: &str,
        _destination_zip: &str,
    ) -> EngineResult<Decimal> {
        Ok(self.miles)
    }
}
