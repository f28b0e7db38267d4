use chrono::NaiveDate;
use tracing::warn;

use crate::attendance::session::DaySession;
use crate::model::attendance::DailyAttendanceRecord;
use crate::store::{self, DocumentStore, attendance_collection, day_document_key};

/// Loads the persisted record for `(employee_id, date)` and rebuilds the
/// in-memory session, unboxing stored timestamps on the way.
///
/// Read and decode failures degrade to an empty session: nothing has
/// been written yet at load time, so there is no data to lose. Never
/// mutates storage.
pub async fn load_day<S: DocumentStore>(
    store: &S,
    employee_id: &str,
    employee_name: &str,
    date: NaiveDate,
) -> DaySession {
    let collection = attendance_collection(employee_id);
    let key = day_document_key(date, employee_id);

    let record: Option<DailyAttendanceRecord> =
        match store::get_typed(store, &collection, &key).await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, employee_id, %date, "Failed to load attendance record, treating day as empty");
                None
            }
        };

    match record {
        Some(record) => {
            let events = record
                .records
                .iter()
                .filter_map(|stored| stored.to_event())
                .collect();
            DaySession::from_events(employee_id, employee_name, date, events)
        }
        None => DaySession::new(employee_id, employee_name, date),
    }
}
