//! # Error Types
//!
//! Typed errors for tally-core.
//!
//! ## Two Kinds of Failure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Failure Channels                                │
//! │                                                                         │
//! │  Business failures (expected, recoverable)                              │
//! │  ├── missing unit price / non-positive price  ─┐                       │
//! │  └── empty / unknown product id on scan        ├─► Outcome::Failed     │
//! │                                                 ┘   (see outcome.rs)    │
//! │                                                                         │
//! │  Infrastructure failures (this file)                                    │
//! │  ├── CoreError        - config file I/O, TOML / JSON parsing           │
//! │  └── ValidationError  - malformed fields (empty id, zero bundle size)  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → host application                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, path, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised outside the scan/price flow.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The terminal config file could not be read.
    #[error("Failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The terminal config file is not valid TOML for [`crate::config::TerminalConfig`].
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The config could not be rendered back to TOML.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A JSON price list could not be parsed.
    #[error("Failed to parse price list: {0}")]
    PriceList(#[from] serde_json::Error),

    /// Config parsed but holds values the terminal cannot run with.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
