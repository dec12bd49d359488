//! # Basket
//!
//! The ordered list of product ids scanned during one checkout session.
//!
//! ## Session Lifecycle
//! ```text
//! Basket::new()  ──► push("A") ──► push("B") ──► ... ──► clear()
//!   session_id = v4                                       new session_id
//!   started_at = now                                      started_at = now
//! ```
//! Totals read the basket and never mutate it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scanned product ids in scan order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    /// Identifies the current checkout session.
    pub session_id: Uuid,

    /// When the session started (creation or last clear).
    pub started_at: DateTime<Utc>,

    items: Vec<String>,
}

impl Basket {
    pub fn new() -> Self {
        Basket {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            items: Vec::new(),
        }
    }

    pub fn push(&mut self, product_id: impl Into<String>) {
        self.items.push(product_id.into());
    }

    /// Removes the most recently scanned occurrence of `product_id`.
    ///
    /// Returns `false` if the product is not in the basket.
    pub fn remove_last(&mut self, product_id: &str) -> bool {
        match self.items.iter().rposition(|id| id == product_id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties the basket and starts a new session.
    pub fn clear(&mut self) {
        self.items.clear();
        self.session_id = Uuid::new_v4();
        self.started_at = Utc::now();
    }

    /// Scanned ids in scan order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of scanned units.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// How many times `product_id` was scanned.
    pub fn quantity_of(&self, product_id: &str) -> u64 {
        self.items.iter().filter(|id| *id == product_id).count() as u64
    }

    /// Scan counts per product, ordered by product id.
    pub fn quantities(&self) -> BTreeMap<&str, u64> {
        let mut counts = BTreeMap::new();
        for id in &self.items {
            *counts.entry(id.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

impl Default for Basket {
    fn default() -> Self {
        Basket::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
