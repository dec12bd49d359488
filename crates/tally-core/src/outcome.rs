//! # Operation Outcomes
//!
//! Terminal operations report expected failures as values rather than
//! panicking or returning `CoreError`.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Outcome<T>                                      │
//! │                                                                         │
//! │  Succeeded           set_pricing / scan went through                    │
//! │  SucceededWith(T)    quote() returns the quoted Money                   │
//! │  Failed(Vec<..>)     one ExecutionError per failed condition            │
//! │                      e.g. both pricing checks failing → 2 messages      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust
//! use tally_core::outcome::Outcome;
//!
//! let outcome: Outcome = Outcome::failed("Product with null or empty id could not be scanned.");
//! assert!(!outcome.is_success());
//! assert_eq!(outcome.messages(), vec!["Product with null or empty id could not be scanned."]);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::Logger;

// =============================================================================
// Execution Error
// =============================================================================

/// A single human-readable failure reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ExecutionError {
    message: String,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        ExecutionError {
            message: message.into(),
        }
    }

    /// The failure reason.
    pub fn message(&self) -> &str {
        &self.message
    }
}

// =============================================================================
// Outcome
// =============================================================================

/// Result of a terminal operation.
///
/// Success means "no errors": [`Outcome::failed_with`] given an empty list
/// yields [`Outcome::Succeeded`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T = ()> {
    /// The operation completed.
    Succeeded,
    /// The operation completed and produced a value.
    SucceededWith(T),
    /// The operation failed.
    ///
    /// The constructors ([`Outcome::failed`], [`Outcome::failed_with`]) never
    /// build an empty list. A hand-built `Failed(vec![])` still counts as a
    /// failure, just one without messages.
    Failed(Vec<ExecutionError>),
}

impl<T> Outcome<T> {
    /// Successful outcome carrying `value`.
    pub fn succeeded_with(value: T) -> Self {
        Outcome::SucceededWith(value)
    }

    /// Failed outcome with a single message.
    pub fn failed(message: impl Into<String>) -> Self {
        Outcome::Failed(vec![ExecutionError::new(message)])
    }

    /// Failed outcome with every collected error, or success when there are none.
    ///
    /// Prefer this over building `Outcome::Failed` directly when the list
    /// may be empty.
    pub fn failed_with(errors: Vec<ExecutionError>) -> Self {
        if errors.is_empty() {
            Outcome::Succeeded
        } else {
            Outcome::Failed(errors)
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failed(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Errors in the order they were raised; empty on success.
    pub fn errors(&self) -> &[ExecutionError] {
        match self {
            Outcome::Failed(errors) => errors,
            _ => &[],
        }
    }

    /// Error messages as string slices.
    pub fn messages(&self) -> Vec<&str> {
        self.errors().iter().map(ExecutionError::message).collect()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::SucceededWith(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::SucceededWith(value) => Some(value),
            _ => None,
        }
    }

    /// Converts into a standard `Result` so callers can use `?`.
    pub fn into_result(self) -> Result<Option<T>, Vec<ExecutionError>> {
        match self {
            Outcome::Succeeded => Ok(None),
            Outcome::SucceededWith(value) => Ok(Some(value)),
            Outcome::Failed(errors) => Err(errors),
        }
    }

    /// Reports every error through the host's logger as a warning.
    pub fn log_failures(&self, logger: &dyn Logger, context: &str) {
        for error in self.errors() {
            logger.warning(&format!("{}: {}", context, error));
        }
    }
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Outcome::Succeeded
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
