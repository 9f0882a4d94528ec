//! Labor-hour estimation.
//!
//! Maps a [`HomeSize`] to the number of crew labor hours a move of that size
//! is expected to take.

use rust_decimal::Decimal;

use crate::models::HomeSize;

/// Hours for the smallest move. Studio moves use this value.
pub const DEFAULT_LABOR_HOURS: u32 = 3;

/// Returns the estimated labor hours for a home size.
///
/// | Home size   | Hours |
/// |-------------|-------|
/// | studio      | 3     |
/// | 1bed        | 4     |
/// | 2bed        | 6     |
/// | 3bed        | 8     |
/// | 4bed        | 10    |
/// | 5bed_plus   | 12    |
/// | commercial  | 12    |
///
/// # Examples
///
/// ```
/// use moving_quote_engine::calculation::labor_hours;
/// use moving_quote_engine::models::HomeSize;
///
/// assert_eq!(labor_hours(HomeSize::TwoBed), 6);
/// ```
pub fn labor_hours(home_size: HomeSize) -> u32 {
    match home_size {
        HomeSize::Studio => DEFAULT_LABOR_HOURS,
        HomeSize::OneBed => 4,
        HomeSize::TwoBed => 6,
        HomeSize::ThreeBed => 8,
        HomeSize::FourBed => 10,
        HomeSize::FiveBedPlus => 12,
        HomeSize::Commercial => 12,
    }
}

/// Returns the labor cost for a home size at the given hourly rate, or `None`
/// if the product overflows.
pub fn labor_cost(home_size: HomeSize, cost_per_labor_hour: Decimal) -> Option<Decimal> {
    Decimal::from(labor_hours(home_size)).checked_mul(cost_per_labor_hour)
}
