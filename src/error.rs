use derive_more::Display;

/// Failures raised by the document store backends.
#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),

    #[display(fmt = "malformed document at {}/{}", collection, key)]
    Decode { collection: String, key: String },

    #[display(fmt = "failed to encode document: {}", _0)]
    Encode(serde_json::Error),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            StoreError::Encode(e) => Some(e),
            StoreError::Decode { .. } => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}

/// Failures of the attendance write path.
///
/// `Persistence` covers the employee's own record only; manager-replica
/// write failures are downgraded to a warning inside the replicator and
/// never reach the caller.
#[derive(Debug, Display)]
pub enum AttendanceError {
    #[display(fmt = "no employee profile for the current user")]
    Unauthenticated,

    #[display(fmt = "employee directory entry not found: {}", _0)]
    UserNotFound(String),

    #[display(fmt = "failed to persist attendance record: {}", _0)]
    Persistence(StoreError),
}

impl std::error::Error for AttendanceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttendanceError::Persistence(e) => Some(e),
            _ => None,
        }
    }
}
