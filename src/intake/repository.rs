//! Lead storage.

use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{LeadRecord, LeadStatus};

/// Storage abstraction for leads so intake can be exercised in isolation.
pub trait LeadRepository: Send + Sync {
    /// Stores a new lead. Fails if a lead with the same id exists.
    fn insert(&self, record: LeadRecord) -> EngineResult<LeadRecord>;
    /// Fetches a lead by id.
    fn fetch(&self, id: &Uuid) -> EngineResult<Option<LeadRecord>>;
    /// Lists leads, newest first, optionally filtered by status.
    fn list(&self, status: Option<LeadStatus>) -> EngineResult<Vec<LeadRecord>>;
    /// Moves a lead to `status`, returning the updated record.
    ///
    /// Fails with [`EngineError::LeadNotFound`] for an unknown id and
    /// [`EngineError::InvalidStatusTransition`] for a forbidden change.
    fn update_status(&self, id: &Uuid, status: LeadStatus) -> EngineResult<LeadRecord>;
}

/// Lead store backed by a vector in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLeadRepository {
    records: Arc<RwLock<Vec<LeadRecord>>>,
}

fn poisoned() -> EngineError {
    EngineError::Repository {
        message: "lead store lock poisoned".to_string(),
    }
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, record: LeadRecord) -> EngineResult<LeadRecord> {
        let mut guard = self.records.write().map_err(|_| poisoned())?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(EngineError::Repository {
                message: format!("lead {} already exists", record.id),
            });
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &Uuid) -> EngineResult<Option<LeadRecord>> {
        let guard = self.records.read().map_err(|_| poisoned())?;
        Ok(guard.iter().find(|record| record.id == *id).cloned())
    }

    fn list(&self, status: Option<LeadStatus>) -> EngineResult<Vec<LeadRecord>> {
        let guard = self.records.read().map_err(|_| poisoned())?;
        let mut records: Vec<LeadRecord> = guard
            .iter()
            .filter(|record| status.is_none_or(|wanted| record.status == wanted))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn update_status(&self, id: &Uuid, status: LeadStatus) -> EngineResult<LeadRecord> {
        let mut guard = self.records.write().map_err(|_| poisoned())?;
        let record = guard
            .iter_mut()
            .find(|record| record.id == *id)
            .ok_or(EngineError::LeadNotFound { id: *id })?;

        record.transition_to(status)?;
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HomeSize, LeadSubmission};
    use chrono::NaiveDate;

    fn record(name: &str) -> LeadRecord {
        LeadRecord::new(
            LeadSubmission {
                customer_name: name.to_string(),
                customer_email: None,
                customer_phone: "5551234567".to_string(),
                phone_digits: "5551234567".to_string(),
                move_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
                origin_zip: "10001".to_string(),
                destination_zip: "10002".to_string(),
                home_size: HomeSize::Studio,
                inventory: None,
            },
            None,
        )
    }

    #[test]
    fn test_insert_then_fetch() {
        let repo = InMemoryLeadRepository::default();
        let stored = repo.insert(record("Ann")).unwrap();

        let fetched = repo.fetch(&stored.id).unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert!(repo.fetch(&Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_insert_is_rejected() {
        let repo = InMemoryLeadRepository::default();
        let lead = record("Ann");
        repo.insert(lead.clone()).unwrap();

        match repo.insert(lead) {
            Err(EngineError::Repository { message }) => assert!(message.contains("already exists")),
            other => panic!("Expected Repository error, got {:?}", other),
        }
    }

    #[test]
    fn test_list_filters_by_status() {
        let repo = InMemoryLeadRepository::default();
        repo.insert(record("Ann")).unwrap();
        let mut quoted = record("Bob");
        quoted.status = LeadStatus::Quoted;
        repo.insert(quoted).unwrap();

        assert_eq!(repo.list(None).unwrap().len(), 2);
        let new_leads = repo.list(Some(LeadStatus::New)).unwrap();
        assert_eq!(new_leads.len(), 1);
        assert_eq!(new_leads[0].submission.customer_name, "Ann");
    }

    #[test]
    fn test_update_status_follows_pipeline() {
        let repo = InMemoryLeadRepository::default();
        let stored = repo.insert(record("Ann")).unwrap();

        let quoted = repo.update_status(&stored.id, LeadStatus::Quoted).unwrap();
        assert_eq!(quoted.status, LeadStatus::Quoted);
        assert_eq!(repo.fetch(&stored.id).unwrap().unwrap().status, LeadStatus::Quoted);

        assert!(matches!(
            repo.update_status(&stored.id, LeadStatus::New),
            Err(EngineError::InvalidStatusTransition { .. })
        ));
        assert_eq!(repo.fetch(&stored.id).unwrap().unwrap().status, LeadStatus::Quoted);
    }

    #[test]
    fn test_update_status_of_unknown_lead() {
        let repo = InMemoryLeadRepository::default();
        let id = Uuid::new_v4();

        match repo.update_status(&id, LeadStatus::Quoted) {
            Err(EngineError::LeadNotFound { id: missing }) => assert_eq!(missing, id),
            other => panic!("Expected LeadNotFound, got {:?}", other),
        }
    }
}
