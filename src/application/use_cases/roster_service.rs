//! Member roster management: the read cache and every audited mutation.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::application::dto::MemberForm;
use crate::domain::entities::{
    Member, MemberDraft, MemberField, MemberId, MemberStatus, Transaction, TransactionAction,
    sort_newest_first,
};
use crate::domain::errors::{RosterError, StoreError, ValidationErrors};
use crate::domain::ports::{
    ClockPort, DocumentStorePort, Fields, MEMBERS_COLLECTION, StoredDocument,
    TRANSACTIONS_COLLECTION,
};
use crate::domain::services::validation::BOOK_VALUE_DECREASED;
use crate::domain::services::{FormContext, summarize_changes, validate};

/// Cached copy of both collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RosterSnapshot {
    pub members: Vec<Member>,
    /// Audit log, newest first.
    pub transactions: Vec<Transaction>,
}

impl RosterSnapshot {
    /// Finds a cached member.
    #[must_use]
    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }
}

/// Owns the roster cache and performs member mutations.
///
/// Every mutation writes the member record, then appends one audit entry,
/// then refetches both collections. The two writes are not atomic.
#[derive(Clone)]
pub struct RosterService {
    store: Arc<dyn DocumentStorePort>,
    clock: Arc<dyn ClockPort>,
    cache: Arc<RwLock<RosterSnapshot>>,
}

impl RosterService {
    /// Creates new roster service with an empty cache.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStorePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            store,
            clock,
            cache: Arc::new(RwLock::new(RosterSnapshot::default())),
        }
    }

    /// Returns a copy of the cache.
    #[must_use]
    pub fn snapshot(&self) -> RosterSnapshot {
        self.cache.read().clone()
    }

    /// Refetches both collections and replaces the cache.
    ///
    /// # Errors
    /// Returns error if either collection cannot be read; the cache is kept.
    pub async fn refresh(&self) -> Result<RosterSnapshot, StoreError> {
        let member_docs = self.store.list(MEMBERS_COLLECTION).await?;
        let transaction_docs = self.store.list(TRANSACTIONS_COLLECTION).await?;

        let members: Vec<Member> = member_docs
            .into_iter()
            .filter_map(|doc| {
                let id = doc.id.clone();
                decode::<Member>(MEMBERS_COLLECTION, doc).map(|m| m.with_id(MemberId::new(id)))
            })
            .collect();
        let mut transactions: Vec<Transaction> = transaction_docs
            .into_iter()
            .filter_map(|doc| decode(TRANSACTIONS_COLLECTION, doc))
            .collect();
        sort_newest_first(&mut transactions);

        debug!(
            members = members.len(),
            transactions = transactions.len(),
            "Roster refreshed"
        );

        let snapshot = RosterSnapshot {
            members,
            transactions,
        };
        *self.cache.write() = snapshot.clone();
        Ok(snapshot)
    }

    /// Saves a submitted form according to its context.
    ///
    /// Viewing saves nothing and returns `None`.
    ///
    /// # Errors
    /// Returns the error of the underlying mutation.
    pub async fn submit(&self, form: &MemberForm) -> Result<Option<Member>, RosterError> {
        let editing = || {
            form.editing
                .clone()
                .ok_or_else(|| RosterError::unknown_member(""))
        };
        let saved = match form.context {
            FormContext::View => return Ok(None),
            FormContext::Create => self.add(&form.draft).await?,
            FormContext::Edit => self.update(&editing()?, &form.draft).await?,
            FormContext::Reactivate => self.reactivate(&editing()?, &form.draft).await?,
        };
        Ok(Some(saved))
    }

    /// Adds a new member.
    ///
    /// # Errors
    /// Returns validation, store or audit errors.
    pub async fn add(&self, draft: &MemberDraft) -> Result<Member, RosterError> {
        let members = self.cache.read().members.clone();
        let member = validate(draft, FormContext::Create, &members, None)?;

        let id = self
            .store
            .create(MEMBERS_COLLECTION, to_fields(&member)?)
            .await
            .map_err(|e| {
                warn!(error = %e, member = %member.name, "Failed to add member");
                e
            })?;
        let member = member.with_id(MemberId::new(id));
        info!(id = %member.id, member = %member.name, "Member added");

        let entry =
            Transaction::for_member(&member, TransactionAction::Added, self.clock.now(), None);
        self.append_audit(&member.name, entry).await?;
        Ok(member)
    }

    /// Updates an existing member and records which fields changed.
    ///
    /// # Errors
    /// Returns validation, store or audit errors.
    pub async fn update(&self, id: &MemberId, draft: &MemberDraft) -> Result<Member, RosterError> {
        self.overwrite(id, draft, FormContext::Edit, TransactionAction::Updated)
            .await
    }

    /// Gives an expired member a new date range.
    ///
    /// # Errors
    /// Returns [`RosterError::NotExpired`] for active members, otherwise
    /// validation, store or audit errors.
    pub async fn reactivate(
        &self,
        id: &MemberId,
        draft: &MemberDraft,
    ) -> Result<Member, RosterError> {
        let existing = self.cached_member(id)?;
        if existing.status_at(self.clock.now()) != MemberStatus::Expired {
            return Err(RosterError::NotExpired {
                name: existing.name,
            });
        }
        self.overwrite(id, draft, FormContext::Reactivate, TransactionAction::Reactivated)
            .await
    }

    /// Deletes a member, leaving only its name in the audit log.
    ///
    /// # Errors
    /// Returns store or audit errors.
    pub async fn delete(&self, id: &MemberId) -> Result<(), RosterError> {
        let existing = self.cached_member(id)?;

        self.store
            .delete(MEMBERS_COLLECTION, id.as_str())
            .await
            .map_err(|e| {
                warn!(error = %e, id = %id, "Failed to delete member");
                e
            })?;
        info!(id = %id, member = %existing.name, "Member deleted");

        let entry = Transaction::deletion(&existing.name, self.clock.now());
        self.append_audit(&existing.name, entry).await
    }

    async fn overwrite(
        &self,
        id: &MemberId,
        draft: &MemberDraft,
        context: FormContext,
        action: TransactionAction,
    ) -> Result<Member, RosterError> {
        let existing = self.cached_member(id)?;
        let members = self.cache.read().members.clone();
        let member = match validate(draft, context, &members, Some(id)) {
            Ok(member) if member.book_value < existing.book_value => {
                debug!(id = %id, "Rejected a lower book value");
                let mut errors = ValidationErrors::new();
                errors.add(MemberField::BookValue, BOOK_VALUE_DECREASED);
                return Err(errors.into());
            }
            result => result?,
        };
        let changes = summarize_changes(&existing, &member);

        self.store
            .update(MEMBERS_COLLECTION, id.as_str(), to_fields(&member)?)
            .await
            .map_err(|e| {
                warn!(error = %e, id = %id, "Failed to save member");
                e
            })?;
        info!(id = %id, member = %member.name, %action, changes = %changes, "Member saved");

        let entry = Transaction::for_member(&member, action, self.clock.now(), Some(changes));
        self.append_audit(&member.name, entry).await?;
        Ok(member)
    }

    /// Appends an audit entry after a record write, then refetches.
    async fn append_audit(&self, name: &str, entry: Transaction) -> Result<(), RosterError> {
        let action = entry.action;
        let appended = match to_fields(&entry) {
            Ok(fields) => self.store.create(TRANSACTIONS_COLLECTION, fields).await,
            Err(e) => Err(e),
        };

        // Refetch either way so the cache shows the record that was written.
        if let Err(e) = self.refresh().await {
            warn!(error = %e, "Failed to refresh roster after mutation");
        }

        appended.map(|_| ()).map_err(|source| {
            error!(
                member = %name,
                %action,
                error = %source,
                "Member record saved but audit entry was not written"
            );
            RosterError::AuditDivergence {
                member: name.to_string(),
                action,
                source,
            }
        })
    }

    fn cached_member(&self, id: &MemberId) -> Result<Member, RosterError> {
        self.cache
            .read()
            .member(id)
            .cloned()
            .ok_or_else(|| RosterError::unknown_member(id.as_str()))
    }
}

fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(other) => Err(StoreError::decode("", "", format!("expected object, got {other}"))),
        Err(e) => Err(StoreError::decode("", "", e.to_string())),
    }
}

fn decode<T: serde::de::DeserializeOwned>(collection: &str, doc: StoredDocument) -> Option<T> {
    match serde_json::from_value(Value::Object(doc.fields)) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(collection, id = %doc.id, error = %e, "Skipping undecodable document");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TransactionStatus;
    use crate::domain::ports::mocks::{FixedClock, MockDocumentStorePort};
    use crate::infrastructure::store::MemoryStore;
    use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
    use rust_decimal::Decimal;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn service(store: Arc<dyn DocumentStorePort>) -> RosterService {
        RosterService::new(store, Arc::new(FixedClock::new(now())))
    }

    /// Service over a memory store, with a handle to move its clock between mutations.
    fn ticking_service() -> (RosterService, Arc<FixedClock>) {
        let clock = Arc::new(FixedClock::new(now()));
        let service = RosterService::new(Arc::new(MemoryStore::new()), clock.clone());
        (service, clock)
    }

    fn draft(name: &str, email: &str) -> MemberDraft {
        MemberDraft {
            name: name.to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-06-01".to_string(),
            email: email.to_string(),
            mobile: "09171234567".to_string(),
            ..MemberDraft::new()
        }
    }

    #[tokio::test]
    async fn test_add_appends_audit_entry() {
        let service = service(Arc::new(MemoryStore::new()));

        let member = service.add(&draft("Ana Cruz", "ana@example.com")).await.unwrap();
        let snapshot = service.snapshot();

        assert!(!member.id.is_unsaved());
        assert_eq!(snapshot.members.len(), 1);
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.transactions[0].action, TransactionAction::Added);
        assert_eq!(snapshot.transactions[0].status, Some(TransactionStatus::Expired));
    }

    #[tokio::test]
    async fn test_duplicate_name_rejected_without_writes() {
        let service = service(Arc::new(MemoryStore::new()));
        service.add(&draft("Ana Cruz", "ana@example.com")).await.unwrap();

        let err = service
            .add(&draft("  ana cruz", "other@example.com"))
            .await
            .unwrap_err();

        assert!(err.validation().is_some());
        assert_eq!(service.snapshot().members.len(), 1);
        assert_eq!(service.snapshot().transactions.len(), 1);
    }

    #[tokio::test]
    async fn test_reactivate_expired_member() {
        let (service, clock) = ticking_service();
        let member = service.add(&draft("Ana Cruz", "ana@example.com")).await.unwrap();
        assert_eq!(member.status_at(now()), MemberStatus::Expired);
        clock.advance(TimeDelta::minutes(1));

        let mut renewed = MemberDraft::from_member(&member);
        renewed.start_date = "2025-01-01".to_string();
        renewed.end_date = "2026-01-01".to_string();
        let saved = service.reactivate(&member.id, &renewed).await.unwrap();

        assert_eq!(saved.status_at(now()), MemberStatus::Active);
        let snapshot = service.snapshot();
        let latest = &snapshot.transactions[0];
        assert_eq!(latest.action, TransactionAction::Reactivated);
        assert_eq!(latest.status, Some(TransactionStatus::Active));
        assert_eq!(latest.changes.as_deref(), Some("Start Date, End Date"));
        assert_eq!(saved.end_date, NaiveDate::from_ymd_opt(2026, 1, 1));
    }

    #[tokio::test]
    async fn test_active_member_cannot_be_reactivated() {
        let service = service(Arc::new(MemoryStore::new()));
        let mut active = draft("Ben", "ben@example.com");
        active.end_date = "2026-01-01".to_string();
        let member = service.add(&active).await.unwrap();

        let err = service.reactivate(&member.id, &active).await.unwrap_err();

        assert!(matches!(err, RosterError::NotExpired { .. }));
    }

    #[tokio::test]
    async fn test_update_records_changes() {
        let (service, clock) = ticking_service();
        let member = service.add(&draft("Ana Cruz", "ana@example.com")).await.unwrap();

        let mut edited = MemberDraft::from_member(&member);
        edited.mobile = "0917 000 0000".to_string();
        clock.advance(TimeDelta::minutes(1));
        service.update(&member.id, &edited).await.unwrap();

        let snapshot = service.snapshot();
        assert_eq!(snapshot.member(&member.id).unwrap().mobile, "0917 000 0000");
        assert_eq!(snapshot.transactions[0].changes.as_deref(), Some("Mobile"));

        clock.advance(TimeDelta::minutes(1));
        service.update(&member.id, &edited).await.unwrap();
        assert_eq!(
            service.snapshot().transactions[0].changes.as_deref(),
            Some("No changes")
        );
    }

    #[tokio::test]
    async fn test_delete_keeps_only_name() {
        let (service, clock) = ticking_service();
        let member = service.add(&draft("Ana Cruz", "ana@example.com")).await.unwrap();

        clock.advance(TimeDelta::minutes(1));
        service.delete(&member.id).await.unwrap();

        let snapshot = service.snapshot();
        assert!(snapshot.members.is_empty());
        let entry = &snapshot.transactions[0];
        assert_eq!(entry.action, TransactionAction::Deleted);
        assert_eq!(entry.name, "Ana Cruz");
        assert_eq!(entry.book_value, None);
    }

    #[tokio::test]
    async fn test_update_cannot_lower_book_value() {
        let (service, clock) = ticking_service();
        let mut funded = draft("Ana Cruz", "ana@example.com");
        funded.book_value = "500".to_string();
        let member = service.add(&funded).await.unwrap();

        let mut lowered = MemberDraft::from_member(&member);
        lowered.book_value = "0".to_string();
        clock.advance(TimeDelta::minutes(1));
        let err = service.update(&member.id, &lowered).await.unwrap_err();

        let errors = err.validation().unwrap();
        assert_eq!(errors.get(MemberField::BookValue), Some(BOOK_VALUE_DECREASED));
        let snapshot = service.snapshot();
        assert_eq!(snapshot.member(&member.id).unwrap().book_value, Decimal::from(500));
        assert_eq!(snapshot.transactions.len(), 1);
    }

    #[tokio::test]
    async fn test_reactivate_cannot_lower_book_value() {
        let (service, clock) = ticking_service();
        let mut funded = draft("Ana Cruz", "ana@example.com");
        funded.book_value = "500".to_string();
        let member = service.add(&funded).await.unwrap();

        let mut renewed = MemberDraft::from_member(&member);
        renewed.start_date = "2025-01-01".to_string();
        renewed.end_date = "2026-01-01".to_string();
        renewed.book_value = "499.99".to_string();
        clock.advance(TimeDelta::minutes(1));
        let err = service.reactivate(&member.id, &renewed).await.unwrap_err();

        assert!(err.validation().is_some_and(|e| e.has(MemberField::BookValue)));
    }

    #[tokio::test]
    async fn test_added_amount_is_saved() {
        let (service, clock) = ticking_service();
        let member = service.add(&draft("Ana Cruz", "ana@example.com")).await.unwrap();

        let mut form = MemberForm::for_member(&member, FormContext::Edit);
        form.add_to_book_value("250").unwrap();
        clock.advance(TimeDelta::minutes(1));
        let saved = service.submit(&form).await.unwrap().unwrap();

        assert_eq!(saved.book_value, Decimal::from(250));
        assert_eq!(
            service.snapshot().transactions[0].changes.as_deref(),
            Some("Lifetime Book Value")
        );
    }

    #[tokio::test]
    async fn test_unknown_member() {
        let service = service(Arc::new(MemoryStore::new()));
        let err = service.delete(&MemberId::new("ghost")).await.unwrap_err();
        assert!(matches!(err, RosterError::UnknownMember { .. }));
    }

    #[tokio::test]
    async fn test_audit_failure_is_reported() {
        let mut store = MockDocumentStorePort::new();
        store.expect_create().returning(|collection, _| {
            if collection == TRANSACTIONS_COLLECTION {
                Err(StoreError::network("connection reset"))
            } else {
                Ok("m1".to_string())
            }
        });
        store.expect_list().returning(|collection| {
            if collection == MEMBERS_COLLECTION {
                let fields = json!({ "name": "Ana Cruz" });
                let Value::Object(fields) = fields else { unreachable!() };
                Ok(vec![StoredDocument::new("m1", fields)])
            } else {
                Ok(Vec::new())
            }
        });
        let service = service(Arc::new(store));

        let err = service
            .add(&draft("Ana Cruz", "ana@example.com"))
            .await
            .unwrap_err();

        assert!(err.record_saved());
        assert!(matches!(
            err,
            RosterError::AuditDivergence { action: TransactionAction::Added, .. }
        ));
        assert_eq!(service.snapshot().members.len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_leaves_cache() {
        let mut store = MockDocumentStorePort::new();
        store
            .expect_create()
            .returning(|_, _| Err(StoreError::status(503, "unavailable")));
        let service = service(Arc::new(store));

        let err = service
            .add(&draft("Ana Cruz", "ana@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, RosterError::Store(_)));
        assert_eq!(service.snapshot(), RosterSnapshot::default());
    }

    #[tokio::test]
    async fn test_refresh_sorts_and_skips_bad_documents() {
        let store = Arc::new(MemoryStore::new());
        let older = json!({
            "name": "old",
            "action": "Added",
            "timestamp": "1/1/2024, 9:00:00 AM",
            "recordedAt": "2024-01-01T09:00:00Z",
        });
        let newer = json!({
            "name": "new",
            "action": "Deleted",
            "recordedAt": "2024-05-01T09:00:00Z",
        });
        let broken = json!({ "name": 42 });
        for doc in [older, newer] {
            let Value::Object(fields) = doc else { unreachable!() };
            store.create(TRANSACTIONS_COLLECTION, fields).await.unwrap();
        }
        let Value::Object(fields) = broken else { unreachable!() };
        store.create(MEMBERS_COLLECTION, fields).await.unwrap();

        let snapshot = service(store).refresh().await.unwrap();

        assert!(snapshot.members.is_empty());
        let names: Vec<_> = snapshot.transactions.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["new", "old"]);
    }
}
