use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use serde::Serialize;
use utoipa::ToSchema;

use crate::attendance::duration::{format_duration, total_hours};
use crate::attendance::status::classify;
use crate::model::attendance::{AttendanceEvent, PresenceStatus};

/// Where a day's session currently stands, derived from the last event.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, strum::Display, ToSchema)]
pub enum SessionStatus {
    #[serde(rename = "Not Checked In")]
    #[strum(serialize = "Not Checked In")]
    NoOpenSession,

    #[serde(rename = "Checked In")]
    #[strum(serialize = "Checked In")]
    CheckedIn,

    #[serde(rename = "Checked Out")]
    #[strum(serialize = "Checked Out")]
    CheckedOut,
}

/// A transition the state machine refuses. Rejected calls mutate
/// nothing and trigger no persistence.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq)]
pub enum TransitionRejected {
    #[display(fmt = "already checked in")]
    AlreadyCheckedIn,
    #[display(fmt = "no open check-in")]
    NotCheckedIn,
}

impl std::error::Error for TransitionRejected {}

/// One employee's check-in/check-out session for a single calendar day.
///
/// Owns the ordered event sequence; the invariant is that every event
/// except possibly the last is closed. UI layers observe and trigger,
/// they never mutate the events directly.
#[derive(Debug, Clone)]
pub struct DaySession {
    pub employee_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    events: Vec<AttendanceEvent>,
}

impl DaySession {
    pub fn new(employee_id: &str, employee_name: &str, date: NaiveDate) -> Self {
        Self::from_events(employee_id, employee_name, date, Vec::new())
    }

    /// Rebuilds a session from persisted events (see the day query).
    pub fn from_events(
        employee_id: &str,
        employee_name: &str,
        date: NaiveDate,
        events: Vec<AttendanceEvent>,
    ) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            employee_name: employee_name.to_string(),
            date,
            events,
        }
    }

    pub fn events(&self) -> &[AttendanceEvent] {
        &self.events
    }

    pub fn status(&self) -> SessionStatus {
        match self.events.last() {
            None => SessionStatus::NoOpenSession,
            Some(event) if !event.is_closed() => SessionStatus::CheckedIn,
            Some(_) => SessionStatus::CheckedOut,
        }
    }

    /// Opens a new event. Valid only while no event is open. Returns the
    /// status to persist: a just-opened session is provisionally marked
    /// present until it is closed, so the recorded status only becomes
    /// accurate on check-out.
    pub fn check_in(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<PresenceStatus, TransitionRejected> {
        if self.status() == SessionStatus::CheckedIn {
            return Err(TransitionRejected::AlreadyCheckedIn);
        }
        self.events.push(AttendanceEvent::open(now));
        Ok(PresenceStatus::Present)
    }

    /// Closes the open event and reclassifies the day from the full
    /// recomputed total. Valid only while checked in.
    pub fn check_out(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<PresenceStatus, TransitionRejected> {
        match self.events.last_mut() {
            Some(event) if !event.is_closed() => {
                event.check_out = Some(now);
                Ok(classify(total_hours(&self.events)))
            }
            _ => Err(TransitionRejected::NotCheckedIn),
        }
    }

    pub fn total_hours(&self) -> f64 {
        total_hours(&self.events)
    }

    pub fn total_duration_formatted(&self) -> String {
        format_duration(self.total_hours())
    }
}
