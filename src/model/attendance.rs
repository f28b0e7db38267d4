use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single check-in/check-out pair within one day's session.
///
/// The check-out stays unset while the session is open; only the last
/// event of a day may be open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceEvent {
    #[schema(value_type = String, format = "date-time")]
    pub check_in: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub check_out: Option<DateTime<Utc>>,
}

impl AttendanceEvent {
    pub fn open(check_in: DateTime<Utc>) -> Self {
        Self {
            check_in,
            check_out: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.check_out.is_some()
    }
}

/// Daily presence classification, persisted as `"P"` / `"A"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum PresenceStatus {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
}

/// Stored form of an [`AttendanceEvent`].
///
/// Timestamps are boxed to epoch milliseconds at the storage boundary;
/// everything above it works on `DateTime<Utc>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEvent {
    pub check_in: i64,
    pub check_out: Option<i64>,
}

impl StoredEvent {
    pub fn from_event(event: &AttendanceEvent) -> Self {
        Self {
            check_in: event.check_in.timestamp_millis(),
            check_out: event.check_out.map(|t| t.timestamp_millis()),
        }
    }

    /// Unboxes back to an in-process event. Returns `None` for timestamps
    /// outside chrono's representable range.
    pub fn to_event(&self) -> Option<AttendanceEvent> {
        let check_in = DateTime::from_timestamp_millis(self.check_in)?;
        let check_out = match self.check_out {
            Some(ms) => Some(DateTime::from_timestamp_millis(ms)?),
            None => None,
        };
        Some(AttendanceEvent {
            check_in,
            check_out,
        })
    }
}

/// The persisted daily attendance document.
///
/// Identity is `(employee_uid, date)`; the date also appears in the
/// document key. The employee's copy is authoritative; the manager's
/// copy is a read replica with identical content under a parallel key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendanceRecord {
    pub name: String,
    pub date: NaiveDate,
    pub records: Vec<StoredEvent>,
    pub total_duration: String,
    pub status: PresenceStatus,
    pub employee_uid: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn stored_event_round_trips_timestamps() {
        let event = AttendanceEvent {
            check_in: Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
            check_out: Some(Utc.with_ymd_and_hms(2026, 3, 2, 17, 30, 0).unwrap()),
        };
        let stored = StoredEvent::from_event(&event);
        assert_eq!(stored.to_event(), Some(event));
    }

    #[test]
    fn open_event_keeps_null_check_out() {
        let event = AttendanceEvent::open(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
        let stored = StoredEvent::from_event(&event);
        assert_eq!(stored.check_out, None);
        assert!(!stored.to_event().unwrap().is_closed());
    }

    #[test]
    fn presence_status_serializes_as_single_letter() {
        assert_eq!(
            serde_json::to_string(&PresenceStatus::Present).unwrap(),
            "\"P\""
        );
        assert_eq!(
            serde_json::to_string(&PresenceStatus::Absent).unwrap(),
            "\"A\""
        );
    }
}
