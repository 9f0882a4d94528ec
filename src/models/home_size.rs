//! Home size model.
//!
//! Home size is the coarse proxy for move volume used to look up
//! estimated labor hours.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The size of the home (or business) being moved.
///
/// This is a closed set: adding a variant requires extending the labor-hours
/// table in [`crate::calculation::labor_hours`].
///
/// # Example
///
/// ```
/// use moving_quote_engine::models::HomeSize;
///
/// let size: HomeSize = "2bed".parse().unwrap();
/// assert_eq!(size, HomeSize::TwoBed);
/// assert_eq!(size.as_str(), "2bed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HomeSize {
    /// Studio apartment.
    #[serde(rename = "studio")]
    Studio,
    /// One bedroom.
    #[serde(rename = "1bed")]
    OneBed,
    /// Two bedrooms.
    #[serde(rename = "2bed")]
    TwoBed,
    /// Three bedrooms.
    #[serde(rename = "3bed")]
    ThreeBed,
    /// Four bedrooms.
    #[serde(rename = "4bed")]
    FourBed,
    /// Five or more bedrooms.
    #[serde(rename = "5bed_plus")]
    FiveBedPlus,
    /// Commercial premises.
    #[serde(rename = "commercial")]
    Commercial,
}

impl HomeSize {
    /// All home sizes, smallest first.
    pub const ALL: [HomeSize; 7] = [
        HomeSize::Studio,
        HomeSize::OneBed,
        HomeSize::TwoBed,
        HomeSize::ThreeBed,
        HomeSize::FourBed,
        HomeSize::FiveBedPlus,
        HomeSize::Commercial,
    ];

    /// Returns the wire name of this home size.
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeSize::Studio => "studio",
            HomeSize::OneBed => "1bed",
            HomeSize::TwoBed => "2bed",
            HomeSize::ThreeBed => "3bed",
            HomeSize::FourBed => "4bed",
            HomeSize::FiveBedPlus => "5bed_plus",
            HomeSize::Commercial => "commercial",
        }
    }
}

impl fmt::Display for HomeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the seven home sizes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "unknown home size '{0}' (expected one of studio, 1bed, 2bed, 3bed, 4bed, 5bed_plus, commercial)"
)]
pub struct UnknownHomeSize(pub String);

impl FromStr for HomeSize {
    type Err = UnknownHomeSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomeSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| UnknownHomeSize(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_wire_names() {
        for size in HomeSize::ALL {
            assert_eq!(size.as_str().parse::<HomeSize>().unwrap(), size);
        }
    }

    #[test]
    fn test_parse_unknown_size_fails() {
        let err = "mansion".parse::<HomeSize>().unwrap_err();
        assert_eq!(err, UnknownHomeSize("mansion".to_string()));
        assert!(err.to_string().contains("5bed_plus"));
    }

    #[test]
    fn test_unknown_size_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(UnknownHomeSize("loft".to_string()));
        assert_eq!(
            err.to_string(),
            "unknown home size 'loft' (expected one of studio, 1bed, 2bed, 3bed, 4bed, 5bed_plus, commercial)"
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Studio".parse::<HomeSize>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&HomeSize::FiveBedPlus).unwrap();
        assert_eq!(json, "\"5bed_plus\"");

        let size: HomeSize = serde_json::from_str("\"1bed\"").unwrap();
        assert_eq!(size, HomeSize::OneBed);
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(HomeSize::Commercial.to_string(), "commercial");
    }
}
