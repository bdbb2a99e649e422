//! Error types for persistence and snapshot import.
//!
//! Clock operations never fail; they clamp or ignore bad input. Only the
//! edges that talk to the outside world return these errors:
//! [`StoreError`] for the settings store, [`SnapshotError`] for session
//! import and [`ExportError`] for leaderboard CSV export.

/// Errors reported by a [`SettingsStore`](crate::persist::SettingsStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached (quota, permissions, absent).
    #[error("settings store unavailable: {0}")]
    Unavailable(String),

    /// A stored value exists but cannot be decoded.
    #[error("corrupt value under {key}: {reason}")]
    Corrupt {
        /// Storage key.
        key: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Errors that abort a snapshot import before any state is touched.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The input is not valid JSON.
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required top-level field is absent or null.
    #[error("snapshot is missing `{0}`")]
    MissingField(&'static str),

    /// A required field has the wrong JSON type.
    #[error("snapshot field `{field}` must be {expected}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Expected JSON type.
        expected: &'static str,
    },
}

/// Errors raised while writing a leaderboard as CSV.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The CSV writer rejected a record or failed to flush.
    #[error("failed to write leaderboard CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The written bytes were not valid UTF-8.
    #[error("leaderboard CSV is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
