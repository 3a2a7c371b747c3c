//! Error taxonomy for seating allocation.
//!
//! Fatal conditions are variants of [`SeatingError`]. Their scope differs:
//! input and room-configuration errors abort the whole run at load time,
//! while [`SeatingError::CapacityExceeded`] aborts a single exam day.
//!
//! Non-fatal conditions (unresolved adjacency conflicts, missing photos)
//! are not errors; see [`crate::models::Warning`].

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SeatingError>;

/// A fatal seating error.
#[derive(Debug, Error)]
pub enum SeatingError {
    /// Roster, room catalog or day list failed validation.
    ///
    /// Carries every problem found, not just the first.
    #[error("invalid input ({} problem(s)): {}", .0.len(), join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// A room's capacity, buffer and layout are inconsistent.
    #[error("invalid configuration for room '{room_id}': {reason}")]
    InvalidRoomConfig { room_id: String, reason: String },

    /// The day's roster does not fit in the total effective capacity.
    #[error(
        "capacity exceeded on day '{day_id}': {required} examinees for {available} seats"
    )]
    CapacityExceeded {
        day_id: String,
        required: usize,
        available: usize,
    },

    /// No examinees to seat.
    #[error("roster is empty")]
    EmptyRoster,

    /// A day index past the end of the day list.
    #[error("no exam day at index {index} ({count} day(s) loaded)")]
    UnknownDay { index: usize, count: usize },

    /// No rooms to seat examinees in.
    #[error("room catalog is empty")]
    EmptyRoomCatalog,

    /// Run configuration is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl SeatingError {
    pub(crate) fn room_config(room_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRoomConfig {
            room_id: room_id.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error only invalidates a single exam day.
    pub fn is_day_scoped(&self) -> bool {
        matches!(self, Self::CapacityExceeded { .. })
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
