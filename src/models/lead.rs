//! Lead models.
//!
//! A lead is a prospective customer's move-quote inquiry, prior to booking.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{HomeSize, Inventory, QuoteBreakdown};

/// A validated, normalized lead submission ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    /// Customer name, trimmed.
    pub customer_name: String,
    /// Customer email, if one was supplied.
    pub customer_email: Option<String>,
    /// Customer phone as entered, trimmed.
    pub customer_phone: String,
    /// The digits of the customer phone.
    pub phone_digits: String,
    /// Requested move date.
    pub move_date: NaiveDate,
    /// 5-digit origin ZIP code.
    pub origin_zip: String,
    /// 5-digit destination ZIP code.
    pub destination_zip: String,
    /// The size of the home being moved.
    pub home_size: HomeSize,
    /// Optional inventory.
    pub inventory: Option<Inventory>,
}

/// Where a lead is in the sales pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Submitted, not yet reviewed.
    New,
    /// A quote has been sent.
    Quoted,
    /// Converted into a scheduled job.
    Booked,
    /// The move has been carried out.
    Completed,
    /// The customer or company withdrew.
    Cancelled,
}

impl LeadStatus {
    /// Returns the wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Quoted => "quoted",
            LeadStatus::Booked => "booked",
            LeadStatus::Completed => "completed",
            LeadStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true if a lead may move from this status to `next`.
    ///
    /// Leads advance new -> quoted -> booked -> completed and may be cancelled
    /// from any open status. Completed and cancelled leads are closed.
    pub fn can_transition_to(self, next: LeadStatus) -> bool {
        matches!(
            (self, next),
            (LeadStatus::New, LeadStatus::Quoted)
                | (LeadStatus::Quoted, LeadStatus::Booked)
                | (LeadStatus::Booked, LeadStatus::Completed)
                | (
                    LeadStatus::New | LeadStatus::Quoted | LeadStatus::Booked,
                    LeadStatus::Cancelled
                )
        )
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// Pipeline status.
    pub status: LeadStatus,
    /// The validated submission.
    pub submission: LeadSubmission,
    /// Automatic estimate computed at intake, if any.
    pub estimate: Option<QuoteBreakdown>,
    /// When the lead was received.
    pub created_at: DateTime<Utc>,
}

impl LeadRecord {
    /// Creates a new lead in the `New` status.
    pub fn new(submission: LeadSubmission, estimate: Option<QuoteBreakdown>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: LeadStatus::New,
            submission,
            estimate,
            created_at: Utc::now(),
        }
    }

    /// Moves the lead to `next`, rejecting transitions the pipeline forbids.
    pub fn transition_to(&mut self, next: LeadStatus) -> EngineResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(EngineError::InvalidStatusTransition {
                id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Returns the customer-facing reference for this lead.
    pub fn reference(&self) -> String {
        let simple = self.id.simple().to_string();
        format!("QUOTE-{}", simple[..8].to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> LeadSubmission {
        LeadSubmission {
            customer_name: "Jane Smith".to_string(),
            customer_email: None,
            customer_phone: "(555) 987-6543".to_string(),
            phone_digits: "5559876543".to_string(),
            move_date: NaiveDate::from_ymd_opt(2026, 4, 20).unwrap(),
            origin_zip: "90210".to_string(),
            destination_zip: "60601".to_string(),
            home_size: HomeSize::OneBed,
            inventory: None,
        }
    }

    #[test]
    fn test_new_lead_starts_in_new_status() {
        let record = LeadRecord::new(submission(), None);
        assert_eq!(record.status, LeadStatus::New);
        assert!(record.estimate.is_none());
    }

    #[test]
    fn test_reference_format() {
        let record = LeadRecord::new(submission(), None);
        let reference = record.reference();
        assert!(reference.starts_with("QUOTE-"));
        assert_eq!(reference.len(), "QUOTE-".len() + 8);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&LeadStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        assert_eq!(LeadStatus::Booked.to_string(), "booked");
    }

    #[test]
    fn test_pipeline_transitions() {
        use LeadStatus::*;

        let allowed = [
            (New, Quoted),
            (New, Cancelled),
            (Quoted, Booked),
            (Quoted, Cancelled),
            (Booked, Completed),
            (Booked, Cancelled),
        ];
        let all = [New, Quoted, Booked, Completed, Cancelled];

        for from in all {
            for to in all {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_transition_updates_status() {
        let mut record = LeadRecord::new(submission(), None);
        record.transition_to(LeadStatus::Quoted).unwrap();
        assert_eq!(record.status, LeadStatus::Quoted);
    }

    #[test]
    fn test_skipping_a_stage_is_rejected() {
        let mut record = LeadRecord::new(submission(), None);

        match record.transition_to(LeadStatus::Completed) {
            Err(EngineError::InvalidStatusTransition { from, to, .. }) => {
                assert_eq!(from, LeadStatus::New);
                assert_eq!(to, LeadStatus::Completed);
            }
            other => panic!("Expected InvalidStatusTransition, got {:?}", other),
        }
        assert_eq!(record.status, LeadStatus::New);
    }
}
