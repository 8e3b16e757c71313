//! Errors in the library.
use thiserror::Error;

/// Errors detected by the wrappers themselves.
///
/// Errors raised by a wrapped environment are not converted into this type;
/// they are propagated as they are.
#[derive(Error, Debug)]
pub enum VecEnvError {
    /// Info key error.
    #[error("Info key error: {0}")]
    InfoKeyError(String),

    /// Info value type error.
    #[error("Info value type error: {0}")]
    InfoValueTypeError(String),

    /// The number of elements does not match the number of slots.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected length or shape.
        expected: String,

        /// Actual length or shape.
        actual: String,
    },

    /// Slot index out of range.
    #[error("Slot index {ix} is out of range for {len} slots")]
    SlotOutOfRange {
        /// Given index.
        ix: usize,

        /// The number of slots.
        len: usize,
    },

    /// `step_wait()` was called without a preceding `step_async()`.
    #[error("No action is pending, call step_async() before step_wait()")]
    NoPendingAction,

    /// The scripted environment has no more steps.
    #[error("Script exhausted after {0} steps")]
    ScriptExhausted(usize),

    /// The environment does not support the requested operation.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl VecEnvError {
    /// Builds [`VecEnvError::ShapeMismatch`] from two lengths.
    pub fn len_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
