/// Errors returned by list operations.
///
/// Every failure leaves the targeted entry unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("no such key: {0}")]
    NotFound(String),
    #[error("list is empty: {0}")]
    Empty(String),
    #[error("invalid range: start {start}, end {end}")]
    InvalidRange { start: i64, end: i64 },
    #[error("index {index} out of range for list of length {len}")]
    OutOfRange { index: i64, len: usize },
}

impl ListError {
    /// Short label used when recording error metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ListError::NotFound(_) => "not_found",
            ListError::Empty(_) => "empty",
            ListError::InvalidRange { .. } => "invalid_range",
            ListError::OutOfRange { .. } => "out_of_range",
        }
    }
}
