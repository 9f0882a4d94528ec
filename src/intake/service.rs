//! Lead intake workflow.
//!
//! Validates a submission, attaches an automatic estimate, stores the lead and
//! then notifies the owner and the customer. Notifications are sent after the
//! lead is stored and their failures are ignored.
//!
//! Stored leads can then be listed, looked up and moved through the sales
//! pipeline.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::calculation::QuoteCalculator;
use crate::error::{EngineError, EngineResult};
use crate::models::{LeadRecord, LeadStatus, QuoteRequest};
use crate::notify::{Notifier, owner_notice, quote_submission_sms, send_best_effort};

use super::repository::LeadRepository;
use super::validation::{RawLeadSubmission, validate_lead};

/// Service composing validation, quoting, storage and notification.
#[derive(Clone)]
pub struct LeadIntakeService {
    calculator: QuoteCalculator,
    repository: Arc<dyn LeadRepository>,
    notifier: Arc<dyn Notifier>,
}

impl LeadIntakeService {
    /// Creates a new intake service.
    pub fn new(
        calculator: QuoteCalculator,
        repository: Arc<dyn LeadRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            calculator,
            repository,
            notifier,
        }
    }

    /// Returns the calculator used for automatic estimates.
    pub fn calculator(&self) -> &QuoteCalculator {
        &self.calculator
    }

    /// Submits a new lead, returning the stored record.
    ///
    /// Fails with [`crate::error::EngineError::Validation`] if the submission
    /// is invalid, or [`crate::error::EngineError::Repository`] if it cannot
    /// be stored. Notification failures are logged and do not fail the call.
    pub async fn submit(&self, raw: RawLeadSubmission) -> EngineResult<LeadRecord> {
        let submission = validate_lead(raw)?;

        let estimate = self
            .calculator
            .calculate(&QuoteRequest {
                origin_zip: submission.origin_zip.clone(),
                destination_zip: submission.destination_zip.clone(),
                home_size: submission.home_size,
                inventory: submission.inventory.clone(),
            })
            .await;

        let stored = self
            .repository
            .insert(LeadRecord::new(submission, Some(estimate)))?;

        info!(
            lead_id = %stored.id,
            reference = %stored.reference(),
            home_size = %stored.submission.home_size,
            "Lead stored"
        );

        send_best_effort(self.notifier.as_ref(), &owner_notice(&stored)).await;
        send_best_effort(self.notifier.as_ref(), &quote_submission_sms(&stored)).await;

        Ok(stored)
    }

    /// Lists stored leads, newest first, optionally only those in `status`.
    pub fn list(&self, status: Option<LeadStatus>) -> EngineResult<Vec<LeadRecord>> {
        self.repository.list(status)
    }

    /// Returns the lead with the given id.
    pub fn get(&self, id: &Uuid) -> EngineResult<LeadRecord> {
        self.repository
            .fetch(id)?
            .ok_or(EngineError::LeadNotFound { id: *id })
    }

    /// Moves a lead to the next pipeline status.
    pub fn update_status(&self, id: &Uuid, status: LeadStatus) -> EngineResult<LeadRecord> {
        let updated = self.repository.update_status(id, status)?;
        info!(lead_id = %updated.id, status = %updated.status, "Lead status updated");
        Ok(updated)
    }
}
