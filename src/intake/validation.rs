//! Lead submission validation.
//!
//! This module turns a raw public quote-form submission into a normalized
//! [`LeadSubmission`], or reports the first field that is invalid. Checks run
//! in a fixed order and stop at the first failure.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::ValidationError;
use crate::models::{HomeSize, Inventory, LeadSubmission};

/// Minimum number of digits in a customer phone number.
pub const MIN_PHONE_DIGITS: usize = 10;

/// A lead submission exactly as received from the quote form.
///
/// Every field is optional here so that a missing value is reported as a
/// [`ValidationError`] on that field rather than as a body parsing failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLeadSubmission {
    /// Customer name.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Customer email (optional).
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Customer phone in any format.
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// Move date as `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[serde(default)]
    pub move_date: Option<String>,
    /// Origin ZIP code.
    #[serde(default)]
    pub origin_zip: Option<String>,
    /// Destination ZIP code.
    #[serde(default)]
    pub destination_zip: Option<String>,
    /// Home size wire name.
    #[serde(default)]
    pub home_size: Option<String>,
    /// Free-form inventory structure.
    #[serde(default)]
    pub inventory: Option<serde_json::Value>,
}

/// Validates and normalizes a raw lead submission.
///
/// Fields are checked in this order, stopping at the first failure:
/// `customer_name`, `customer_email`, `customer_phone`, `origin_zip`,
/// `destination_zip`, `home_size`, `move_date`, `inventory`.
///
/// # Examples
///
/// ```
/// use moving_quote_engine::intake::{RawLeadSubmission, validate_lead};
///
/// let raw = RawLeadSubmission {
///     customer_name: Some("".to_string()),
///     customer_phone: Some("12345".to_string()),
///     origin_zip: Some("1".to_string()),
///     destination_zip: Some("90210".to_string()),
///     home_size: Some("2bed".to_string()),
///     ..Default::default()
/// };
///
/// let err = validate_lead(raw).unwrap_err();
/// assert_eq!(err.field, "customer_name");
/// ```
pub fn validate_lead(raw: RawLeadSubmission) -> Result<LeadSubmission, ValidationError> {
    let customer_name = validate_name(raw.customer_name)?;
    let customer_email = validate_email(raw.customer_email)?;
    let (customer_phone, phone_digits) = validate_phone(raw.customer_phone)?;
    let origin_zip = validate_zip("origin_zip", raw.origin_zip)?;
    let destination_zip = validate_zip("destination_zip", raw.destination_zip)?;
    let home_size = validate_home_size(raw.home_size)?;
    let move_date = validate_move_date(raw.move_date)?;
    let inventory = validate_inventory(raw.inventory)?;

    Ok(LeadSubmission {
        customer_name,
        customer_email,
        customer_phone,
        phone_digits,
        move_date,
        origin_zip,
        destination_zip,
        home_size,
        inventory,
    })
}

/// Returns true if `zip` is exactly five ASCII digits.
pub fn is_valid_zip(zip: &str) -> bool {
    zip.len() == 5 && zip.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true if `email` is a deliverable-looking address.
///
/// Syntax is checked by [`ValidateEmail`]. On top of that the local part must
/// be a dot-atom (no leading, trailing or doubled dots) and the domain must
/// contain a dot.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    email.to_owned().validate_email()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && domain.contains('.')
}

/// Returns the ASCII digits of a phone number, discarding everything else.
pub fn phone_digits(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

fn required(field: &str, value: Option<String>) -> Result<String, ValidationError> {
    value.ok_or_else(|| ValidationError::new(field, "is required"))
}

fn validate_name(value: Option<String>) -> Result<String, ValidationError> {
    let name = required("customer_name", value)?;
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new("customer_name", "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_email(value: Option<String>) -> Result<Option<String>, ValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(email) if is_valid_email(email) => Ok(Some(email.to_string())),
        Some(_) => Err(ValidationError::new(
            "customer_email",
            "must be a valid email address",
        )),
    }
}

fn validate_phone(value: Option<String>) -> Result<(String, String), ValidationError> {
    let phone = required("customer_phone", value)?;
    let digits = phone_digits(&phone);
    if digits.len() < MIN_PHONE_DIGITS {
        return Err(ValidationError::new(
            "customer_phone",
            format!(
                "must contain at least {} digits (found {})",
                MIN_PHONE_DIGITS,
                digits.len()
            ),
        ));
    }
    Ok((phone.trim().to_string(), digits))
}

fn validate_zip(field: &str, value: Option<String>) -> Result<String, ValidationError> {
    let zip = required(field, value)?;
    if !is_valid_zip(&zip) {
        return Err(ValidationError::new(field, "must be exactly 5 digits"));
    }
    Ok(zip)
}

fn validate_home_size(value: Option<String>) -> Result<HomeSize, ValidationError> {
    let raw = required("home_size", value)?;
    raw.parse::<HomeSize>()
        .map_err(|err| ValidationError::new("home_size", err.to_string()))
}

fn validate_move_date(value: Option<String>) -> Result<NaiveDate, ValidationError> {
    let raw = required("move_date", value)?;
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| {
            ValidationError::new(
                "move_date",
                format!("'{}' is not a date (expected YYYY-MM-DD)", raw),
            )
        })
}

fn validate_inventory(
    value: Option<serde_json::Value>,
) -> Result<Option<Inventory>, ValidationError> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value @ serde_json::Value::Object(_)) => serde_json::from_value(value)
            .map(Some)
            .map_err(|err| ValidationError::new("inventory", err.to_string())),
        Some(_) => Err(ValidationError::new("inventory", "must be an object")),
    }
}
