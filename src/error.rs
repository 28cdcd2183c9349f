use thiserror::Error;

/// Failures of timer store actions and form submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Timer {0} not found")]
    NotFound(u32),
    /// The form was rejected by validation. The user has already been
    /// notified, so callers should not print this again.
    #[error("Timer form rejected")]
    FormRejected,
}
