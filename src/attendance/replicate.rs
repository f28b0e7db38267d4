use tracing::{error, warn};

use crate::attendance::session::DaySession;
use crate::directory::EmployeeDirectory;
use crate::error::AttendanceError;
use crate::model::attendance::{DailyAttendanceRecord, PresenceStatus, StoredEvent};
use crate::store::{self, DocumentStore, attendance_collection, day_document_key};

/// What the replicator managed to write.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ReplicationOutcome {
    /// True when a manager was assigned and the replica write succeeded.
    pub manager_replicated: bool,
}

/// Persists the day's record under the employee's own collection and,
/// when the directory entry names a manager, writes an identical payload
/// under the manager's collection.
///
/// The two writes are independent: the employee write is authoritative
/// and its failure is returned to the caller; the manager replica is
/// best-effort, issued only after the employee write, and its failure is
/// logged and swallowed. No transaction spans the two.
pub async fn replicate_day_record<S: DocumentStore>(
    store: &S,
    directory: &EmployeeDirectory,
    session: &DaySession,
    status: PresenceStatus,
) -> Result<ReplicationOutcome, AttendanceError> {
    // The directory entry gates everything: without it, zero writes.
    let entry = directory
        .lookup(store, &session.employee_id)
        .await
        .map_err(AttendanceError::Persistence)?
        .ok_or_else(|| AttendanceError::UserNotFound(session.employee_id.clone()))?;

    let record = DailyAttendanceRecord {
        name: session.employee_name.clone(),
        date: session.date,
        records: session.events().iter().map(StoredEvent::from_event).collect(),
        total_duration: session.total_duration_formatted(),
        status,
        employee_uid: session.employee_id.clone(),
    };

    let doc_key = day_document_key(session.date, &session.employee_id);
    let own_collection = attendance_collection(&session.employee_id);

    store::set_typed(store, &own_collection, &doc_key, &record)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = %session.employee_id, "Failed to persist attendance record");
            AttendanceError::Persistence(e)
        })?;

    let mut manager_replicated = false;
    if let Some(manager_id) = entry.assigned_manager_id.as_deref() {
        let manager_collection = attendance_collection(manager_id);
        match store::set_typed(store, &manager_collection, &doc_key, &record).await {
            Ok(()) => manager_replicated = true,
            Err(e) => {
                // The employee's record is the source of truth; a failed
                // replica never unwinds it or fails the operation.
                warn!(
                    error = %e,
                    employee_id = %session.employee_id,
                    manager_id,
                    "Failed to update manager attendance replica"
                );
            }
        }
    }

    Ok(ReplicationOutcome { manager_replicated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::store::{USERS_COLLECTION, set_typed};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    use crate::error::StoreError;

    /// Wraps a MemoryStore and fails writes to configured collections.
    struct FlakyStore {
        inner: MemoryStore,
        failing: Arc<Mutex<Vec<String>>>,
    }

    impl FlakyStore {
        fn new(inner: MemoryStore) -> Self {
            Self {
                inner,
                failing: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn fail_writes_to(&self, collection: &str) {
            self.failing.lock().unwrap().push(collection.to_string());
        }
    }

    impl DocumentStore for FlakyStore {
        async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
            self.inner.get(collection, key).await
        }

        async fn set(
            &self,
            collection: &str,
            key: &str,
            document: &Value,
        ) -> Result<(), StoreError> {
            if self.failing.lock().unwrap().iter().any(|c| c == collection) {
                return Err(StoreError::Database(sqlx::Error::Protocol(
                    "injected write failure".into(),
                )));
            }
            self.inner.set(collection, key, document).await
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, hour, min, 0).unwrap()
    }

    async fn seed_user(store: &impl DocumentStore, id: &str, manager: Option<&str>) {
        let mut doc = json!({"name": "John Doe"});
        if let Some(m) = manager {
            doc["assignedManagerId"] = json!(m);
        }
        set_typed(store, USERS_COLLECTION, id, &doc).await.unwrap();
    }

    fn worked_day(employee_id: &str) -> DaySession {
        let mut session = DaySession::new(employee_id, "John Doe", date());
        session.check_in(at(9, 0)).unwrap();
        session.check_out(at(17, 30)).unwrap();
        session
    }

    #[actix_web::test]
    async fn writes_both_namespaces_with_identical_payloads() {
        let store = MemoryStore::new();
        seed_user(&store, "emp-1", Some("mgr-1")).await;
        let directory = EmployeeDirectory::new();
        let session = worked_day("emp-1");

        let outcome =
            replicate_day_record(&store, &directory, &session, PresenceStatus::Present)
                .await
                .unwrap();
        assert!(outcome.manager_replicated);

        let own = store
            .get("attendance_emp-1", "2026-03-02_emp-1")
            .await
            .unwrap()
            .unwrap();
        let replica = store
            .get("attendance_mgr-1", "2026-03-02_emp-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(own, replica);
        assert_eq!(own["totalDuration"], json!("8.5 hours"));
        assert_eq!(own["status"], json!("P"));
        assert_eq!(own["employeeUid"], json!("emp-1"));
    }

    #[actix_web::test]
    async fn no_manager_means_exactly_one_write() {
        let store = MemoryStore::new();
        seed_user(&store, "emp-2", None).await;
        let directory = EmployeeDirectory::new();
        let session = worked_day("emp-2");

        let outcome =
            replicate_day_record(&store, &directory, &session, PresenceStatus::Present)
                .await
                .unwrap();
        assert!(!outcome.manager_replicated);
        // The user doc plus the single attendance doc.
        assert_eq!(store.document_count(), 2);
    }

    #[actix_web::test]
    async fn missing_directory_entry_writes_nothing() {
        let store = MemoryStore::new();
        let directory = EmployeeDirectory::new();
        let session = worked_day("ghost");

        let err = replicate_day_record(&store, &directory, &session, PresenceStatus::Present)
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::UserNotFound(ref id) if id == "ghost"));
        assert_eq!(store.document_count(), 0);
    }

    #[actix_web::test]
    async fn manager_write_failure_is_swallowed() {
        let inner = MemoryStore::new();
        seed_user(&inner, "emp-3", Some("mgr-3")).await;
        let store = FlakyStore::new(inner.clone());
        store.fail_writes_to("attendance_mgr-3");
        let directory = EmployeeDirectory::new();
        let session = worked_day("emp-3");

        let outcome =
            replicate_day_record(&store, &directory, &session, PresenceStatus::Present)
                .await
                .unwrap();
        assert!(!outcome.manager_replicated);
        // The employee's own write survived.
        assert!(
            inner
                .get("attendance_emp-3", "2026-03-02_emp-3")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[actix_web::test]
    async fn employee_write_failure_is_reported() {
        let inner = MemoryStore::new();
        seed_user(&inner, "emp-4", Some("mgr-4")).await;
        let store = FlakyStore::new(inner.clone());
        store.fail_writes_to("attendance_emp-4");
        let directory = EmployeeDirectory::new();
        let session = worked_day("emp-4");

        let err = replicate_day_record(&store, &directory, &session, PresenceStatus::Present)
            .await
            .unwrap_err();
        assert!(matches!(err, AttendanceError::Persistence(_)));
        // The manager write is issued only after the employee write succeeds.
        assert!(
            inner
                .get("attendance_mgr-4", "2026-03-02_emp-4")
                .await
                .unwrap()
                .is_none()
        );
    }
}
