//! Error taxonomy for tracker operations
//!
//! Three kinds of failure exist, and a surrounding test harness should treat
//! them differently:
//! - [`TrackError::State`] and [`TrackError::Arity`] are usage errors in the
//!   test itself (wrong lifecycle order, wrong number of expected values);
//! - [`TrackError::Assertion`] is the tracker doing its job: the measured
//!   refcount delta did not satisfy the expectation.
//!
//! Every error is raised synchronously at the point of violation; nothing is
//! caught or retried internally.

use thiserror::Error;

use crate::pseudo::Expected;
use crate::track::State;

/// Errors produced by [`Tracker`](crate::Tracker) operations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TrackError {
    /// The tracker is in the wrong lifecycle state for the operation
    #[error("tracker is {actual}, operation requires {required}")]
    State {
        /// State the operation needs
        required: State,
        /// State the tracker is actually in
        actual: State,
    },

    /// The number of expected deltas is neither one nor the tracked count
    #[error("{given} expected deltas for {tracked} tracked objects")]
    Arity {
        /// Number of expected values passed
        given: usize,
        /// Number of tracked objects
        tracked: usize,
    },

    /// A measured delta did not satisfy its expectation
    #[error("object {index}: measured delta {actual}, asserted {expected}")]
    Assertion {
        /// Position of the offending object in the tracked sequence
        index: usize,
        /// The asserted value or pseudo-number
        expected: Expected,
        /// The measured delta
        actual: i64,
    },
}

impl TrackError {
    /// Whether this error means "the assertion failed" rather than
    /// "the tracker was misused"
    pub fn is_assertion_failure(&self) -> bool {
        matches!(self, TrackError::Assertion { .. })
    }
}

/// Result type alias for tracker operations
pub type TrackResult<T> = Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_context() {
        let err = TrackError::Assertion {
            index: 1,
            expected: Expected::Exact(0),
            actual: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("object 1"));
        assert!(msg.contains("measured delta 2"));
        assert!(msg.contains("asserted 0"));
    }

    #[test]
    fn state_error_names_both_states() {
        let err = TrackError::State {
            required: State::Created,
            actual: State::Exited,
        };
        let msg = err.to_string();
        assert!(msg.contains("exited"));
        assert!(msg.contains("created"));
    }

    #[test]
    fn assertion_failures_are_distinguishable() {
        let usage = TrackError::Arity { given: 3, tracked: 2 };
        let failed = TrackError::Assertion {
            index: 0,
            expected: Expected::Exact(1),
            actual: 0,
        };
        assert!(!usage.is_assertion_failure());
        assert!(failed.is_assertion_failure());
    }
}
