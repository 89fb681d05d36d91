//! Error types with stable reason codes
//!
//! Code ranges:
//! - C1xx: classification (coin/line contract violations)
//! - C2xx: configuration (reference tables)
//! - C3xx: requests (wire-level input)

use thiserror::Error;

/// A toss or line position outside its contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassificationError {
    /// Back-count outside 0..=3
    #[error("C101_TOSS_OUT_OF_RANGE: back-count {value} is outside 0..=3")]
    TossOutOfRange { value: u8 },
    /// Line position outside 0..=5
    #[error("C102_POSITION_OUT_OF_RANGE: line position {position} is outside 0..=5")]
    PositionOutOfRange { position: usize },
    /// Recorded cast whose figures disagree with its lines
    #[error("C103_INCONSISTENT_CAST: {reason}")]
    InconsistentCast { reason: &'static str },
}

impl ClassificationError {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::TossOutOfRange { .. } => "C101_TOSS_OUT_OF_RANGE",
            Self::PositionOutOfRange { .. } => "C102_POSITION_OUT_OF_RANGE",
            Self::InconsistentCast { .. } => "C103_INCONSISTENT_CAST",
        }
    }
}

/// Reference table failed to load or validate
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("C201_TABLE_UNREADABLE: {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("C202_TABLE_MALFORMED: {table}: {source}")]
    Malformed {
        table: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("C203_TABLE_SIZE: {table} has {found} entries, expected {expected}")]
    WrongSize {
        table: &'static str,
        found: usize,
        expected: usize,
    },
    #[error("C204_TABLE_DUPLICATE: {table} repeats {key}")]
    Duplicate { table: &'static str, key: String },
    #[error("C205_TABLE_INVALID_ENTRY: {table} entry {key}: {reason}")]
    InvalidEntry {
        table: &'static str,
        key: String,
        reason: String,
    },
    #[error("C206_TABLE_EMPTY: {table} has no entries")]
    Empty { table: &'static str },
}

impl ConfigurationError {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unreadable { .. } => "C201_TABLE_UNREADABLE",
            Self::Malformed { .. } => "C202_TABLE_MALFORMED",
            Self::WrongSize { .. } => "C203_TABLE_SIZE",
            Self::Duplicate { .. } => "C204_TABLE_DUPLICATE",
            Self::InvalidEntry { .. } => "C205_TABLE_INVALID_ENTRY",
            Self::Empty { .. } => "C206_TABLE_EMPTY",
        }
    }
}

/// Invalid cast or solar-correction request
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("C301_INVALID_DATE: cannot parse {input:?} as an ISO-8601 timestamp")]
    InvalidDate { input: String },
    #[error("C302_CONFLICTING_SOURCES: {0}")]
    ConflictingSources(&'static str),
    #[error("C303_WRONG_TOSS_COUNT: expected 6 tosses, got {0}")]
    WrongTossCount(usize),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
}

impl RequestError {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => "C301_INVALID_DATE",
            Self::ConflictingSources(_) => "C302_CONFLICTING_SOURCES",
            Self::WrongTossCount(_) => "C303_WRONG_TOSS_COUNT",
            Self::Classification(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_message_carries_code() {
        let err = ClassificationError::TossOutOfRange { value: 4 };
        let msg = err.to_string();
        assert!(msg.starts_with("C101_TOSS_OUT_OF_RANGE"), "got {}", msg);
        assert!(msg.contains('4'));
    }

    #[test]
    fn test_request_error_forwards_classification_code() {
        let err: RequestError = ClassificationError::PositionOutOfRange { position: 9 }.into();
        assert_eq!(err.code(), "C102_POSITION_OUT_OF_RANGE");
    }

    #[test]
    fn test_configuration_codes() {
        let err = ConfigurationError::WrongSize { table: "hexagrams", found: 63, expected: 64 };
        assert_eq!(err.code(), "C203_TABLE_SIZE");
        assert!(err.to_string().contains("63"));
    }
}
