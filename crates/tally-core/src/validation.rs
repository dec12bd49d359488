//! # Validation Module
//!
//! Field validators used when building pricing rules and loading config.
//!
//! These guard individual fields. The whole-table checks (every product has
//! a unit price, every price is positive) live in [`crate::pricing::RuleTable`]
//! because they are reported as [`crate::outcome::Outcome`] failures.
//!
//! ## Usage
//! ```rust
//! use tally_core::validation::{validate_bundle_size, validate_product_id};
//!
//! assert!(validate_product_id("A").is_ok());
//! assert!(validate_product_id("").is_err());
//!
//! assert_eq!(validate_bundle_size(3).unwrap().get(), 3);
//! assert!(validate_bundle_size(0).is_err());
//! ```

use std::num::NonZeroU32;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product id (barcode payloads fit comfortably).
pub const MAX_PRODUCT_ID_LEN: usize = 64;

/// Validates a product identifier for a pricing rule.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_PRODUCT_ID_LEN`] characters
/// - No control characters (scanner noise such as a trailing `\r`)
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    if id.chars().count() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "product_id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    if id.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "product_id".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(())
}

/// Validates a bundle size and narrows it to `NonZeroU32`.
pub fn validate_bundle_size(size: u32) -> ValidationResult<NonZeroU32> {
    NonZeroU32::new(size).ok_or_else(|| ValidationError::MustBePositive {
        field: "bundle_size".to_string(),
    })
}

/// Validates the optional basket size limit from config.
pub fn validate_max_basket_size(limit: Option<usize>) -> ValidationResult<()> {
    match limit {
        Some(0) => Err(ValidationError::MustBePositive {
            field: "max_basket_size".to_string(),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
