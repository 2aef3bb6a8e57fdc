//! Error taxonomy for the journal core.
//!
//! Nothing in here is fatal: validation failures are reported back to the
//! form, stale ids degrade to no-ops, and a missing location fix only costs
//! the initial map view.

use thiserror::Error;

/// Form field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FormField::Distance => "distance",
            FormField::Duration => "duration",
            FormField::Cadence => "cadence",
            FormField::Elevation => "elevation",
        };
        write!(f, "{name}")
    }
}

/// Recoverable errors produced by journal operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JournalError {
    /// Non-numeric, non-finite, or out-of-range form input
    #[error("invalid {field}: enter a positive number")]
    Validation { field: FormField },

    /// A lookup or delete referenced an id no longer in the store
    #[error("no workout with id {id}")]
    NotFound { id: String },

    /// The locator could not produce a position fix
    #[error("could not determine your location: {reason}")]
    LocationUnavailable { reason: String },
}

impl JournalError {
    pub fn not_found(id: &str) -> Self {
        JournalError::NotFound { id: id.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err = JournalError::Validation {
            field: FormField::Distance,
        };
        assert!(err.to_string().contains("distance"));
    }

    #[test]
    fn test_not_found_message_carries_id() {
        let err = JournalError::not_found("abc-123");
        assert!(err.to_string().contains("abc-123"));
    }
}
