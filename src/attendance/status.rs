use crate::model::attendance::PresenceStatus;

/// A day counts as present from eight worked hours upward.
pub const PRESENT_THRESHOLD_HOURS: f64 = 8.0;

/// Classifies total worked hours into a presence status. The boundary
/// value of exactly 8.0 hours is present.
pub fn classify(total_hours: f64) -> PresenceStatus {
    if total_hours >= PRESENT_THRESHOLD_HOURS {
        PresenceStatus::Present
    } else {
        PresenceStatus::Absent
    }
}
