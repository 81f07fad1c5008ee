use std::fmt::{Display, Formatter, Result as FmtResult};

/// The one recoverable failure a `Stream` can report.
///
/// Everything else -- empty reads, `speed` near 1, zero-length writes,
/// flushing an empty input queue -- is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamError {
    /// Growing a sample queue (input or output) failed. The stream is still
    /// usable; the call that returned this produced no output.
    AllocationFailed,
}

impl Display for StreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StreamError::AllocationFailed => {
                write!(f, "failed to grow a sample queue")
            }
        }
    }
}

impl std::error::Error for StreamError {}

/// Construction-time argument problems for [`Stream::new`](crate::Stream::new).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewStreamError {
    /// `speed` was zero, negative, NaN, or infinite.
    InvalidSpeed,
    /// `sample_rate` was zero.
    InvalidSampleRate,
}

impl Display for NewStreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NewStreamError::InvalidSpeed => {
                write!(f, "speed must be a finite, positive number")
            }
            NewStreamError::InvalidSampleRate => {
                write!(f, "sample_rate must be nonzero")
            }
        }
    }
}

impl std::error::Error for NewStreamError {}
