//! Notification message rendering.
//!
//! Builds the owner's "new quote request" email and the customer's
//! submission-confirmation SMS for a freshly stored lead.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::intake::phone_digits;
use crate::models::{Inventory, LeadRecord};

/// Recipient used for notices addressed to the business owner.
pub const OWNER_RECIPIENT: &str = "owner";

/// Delivery channel for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Email.
    Email,
    /// Text message.
    Sms,
}

impl Channel {
    /// Returns the channel name used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
        }
    }
}

/// A rendered message ready to hand to a [`super::Notifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// How the message is delivered.
    pub channel: Channel,
    /// Email address, phone number or [`OWNER_RECIPIENT`].
    pub recipient: String,
    /// Subject line, for channels that have one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Message body.
    pub body: String,
}

/// Normalizes a phone number to `+1` followed by its digits.
///
/// Numbers that already start with `+` are assumed to carry a country code
/// and are returned unchanged.
///
/// # Example
///
/// ```
/// use moving_quote_engine::notify::normalize_phone;
///
/// assert_eq!(normalize_phone("(555) 123-4567"), "+15551234567");
/// assert_eq!(normalize_phone("+44 20 7946 0958"), "+44 20 7946 0958");
/// ```
pub fn normalize_phone(phone: &str) -> String {
    let phone = phone.trim();
    if phone.starts_with('+') {
        phone.to_string()
    } else {
        format!("+1{}", phone_digits(phone))
    }
}

fn join_items(items: &BTreeSet<String>) -> String {
    items.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Renders an inventory as an indented, human-readable summary.
pub fn format_inventory(inventory: Option<&Inventory>) -> String {
    let Some(inventory) = inventory else {
        return "No inventory details provided".to_string();
    };

    let mut sections = Vec::new();

    let rooms: Vec<String> = inventory
        .rooms
        .iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(room, items)| format!("  {}: {}", room, join_items(items)))
        .collect();
    if !rooms.is_empty() {
        sections.push(format!("Rooms & Items:\n{}", rooms.join("\n")));
    }
    if !inventory.appliances.is_empty() {
        sections.push(format!("Appliances: {}", join_items(&inventory.appliances)));
    }
    if !inventory.special_items.is_empty() {
        sections.push(format!("Special Items: {}", join_items(&inventory.special_items)));
    }

    if sections.is_empty() {
        "No items selected".to_string()
    } else {
        sections.join("\n\n")
    }
}

/// Builds the owner's new-quote-request email for a lead.
///
/// The body is a sequence of blank-line separated sections. A fallback
/// estimate is not shown; the owner is asked to price the move by hand.
pub fn owner_notice(lead: &LeadRecord) -> Notification {
    let submission = &lead.submission;

    let estimate = match &lead.estimate {
        Some(estimate) if !estimate.is_fallback() => format!(
            "Estimated Quote:\n\
             - Base Cost: ${}\n\
             - Distance ({} mi): ${}\n\
             - Labor: ${}\n\
             - Total Estimate: ${}\n\n\
             Note: This is an estimate. Review and contact customer with final quote.",
            estimate.base_cost,
            estimate.estimated_distance_miles,
            estimate.distance_cost,
            estimate.labor_cost,
            estimate.total_cost
        ),
        _ => "Awaiting manual review for final quote.".to_string(),
    };

    let sections = [
        format!("New Quote Request Received ({})", lead.reference()),
        format!(
            "Customer Information:\n- Name: {}\n- Email: {}\n- Phone: {}",
            submission.customer_name,
            submission.customer_email.as_deref().unwrap_or("not provided"),
            submission.customer_phone
        ),
        format!(
            "Move Details:\n- Move Date: {}\n- From: ZIP {}\n- To: ZIP {}\n- Home Size: {}",
            submission.move_date.format("%Y-%m-%d"),
            submission.origin_zip,
            submission.destination_zip,
            submission.home_size
        ),
        format!(
            "Inventory Summary:\n{}",
            format_inventory(submission.inventory.as_ref())
        ),
        estimate,
        "Action Required: Review this quote request and contact the customer with your final quote."
            .to_string(),
    ];

    Notification {
        channel: Channel::Email,
        recipient: OWNER_RECIPIENT.to_string(),
        subject: Some(format!(
            "New Quote Request from {}",
            submission.customer_name
        )),
        body: sections.join("\n\n"),
    }
}

/// Builds the customer's submission-confirmation text message.
pub fn quote_submission_sms(lead: &LeadRecord) -> Notification {
    Notification {
        channel: Channel::Sms,
        recipient: normalize_phone(&lead.submission.customer_phone),
        subject: None,
        body: format!(
            "Hi {}! We received your moving quote request. Our team will review it and contact you within 24 hours. Quote ID: {}",
            lead.submission.customer_name,
            lead.reference()
        ),
    }
}
