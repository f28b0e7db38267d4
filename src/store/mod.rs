use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::StoreError;

pub mod memory;
pub mod mysql;

/// Employee directory documents, keyed by employee id.
pub const USERS_COLLECTION: &str = "users";

/// Payslip documents, keyed by a fresh UUID per entry.
pub const PAYSLIPS_COLLECTION: &str = "payslips";

/// Collection holding daily attendance documents for one owner.
///
/// The same scheme serves both sides of the replication: the employee's
/// own records live under their id, the manager's read replicas under
/// the manager's id.
pub fn attendance_collection(owner_id: &str) -> String {
    format!("attendance_{owner_id}")
}

/// Document key for one employee's record on one calendar day.
pub fn day_document_key(date: NaiveDate, employee_id: &str) -> String {
    format!("{date}_{employee_id}")
}

/// A key-value document store: full-document reads and overwriting
/// writes, addressed by `(collection, document key)`. Per-document
/// atomicity is the only consistency guarantee.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError>;

    /// Full overwrite; the previous document, if any, is replaced.
    async fn set(&self, collection: &str, key: &str, document: &Value) -> Result<(), StoreError>;
}

/// Reads and decodes a document into `T`.
pub async fn get_typed<S, T>(store: &S, collection: &str, key: &str) -> Result<Option<T>, StoreError>
where
    S: DocumentStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(collection, key).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|_| StoreError::Decode {
                collection: collection.to_string(),
                key: key.to_string(),
            }),
        None => Ok(None),
    }
}

/// Encodes and writes a document (full overwrite).
pub async fn set_typed<S, T>(store: &S, collection: &str, key: &str, document: &T) -> Result<(), StoreError>
where
    S: DocumentStore + ?Sized,
    T: Serialize,
{
    let value = serde_json::to_value(document).map_err(StoreError::Encode)?;
    store.set(collection, key, &value).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_naming_is_consistent_for_both_namespaces() {
        assert_eq!(attendance_collection("emp-1"), "attendance_emp-1");
        assert_eq!(attendance_collection("mgr-9"), "attendance_mgr-9");
    }

    #[test]
    fn day_key_combines_date_and_employee() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(day_document_key(date, "emp-1"), "2026-03-02_emp-1");
    }
}
