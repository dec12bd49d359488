//! # Pricing Rules
//!
//! Bundle pricing rules and the greedy decomposition that turns a scanned
//! quantity into money.
//!
//! ## Rule Table Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input (any order)              RuleTable (grouped, largest first)      │
//! │  ─────────────────              ─────────────────────────────────       │
//! │  A: 1 for $1.25                 "A" → [3 for $3.00, 1 for $1.25]        │
//! │  B: 1 for $4.25        ───►     "B" → [1 for $4.25]                     │
//! │  C: 1 for $1.00                 "C" → [6 for $5.00, 1 for $1.00]        │
//! │  A: 3 for $3.00                 "D" → [1 for $0.75]                     │
//! │  C: 6 for $5.00                                                         │
//! │  D: 1 for $0.75                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Greedy Decomposition
//! ```text
//! 7 × "C" with [6 for $5.00, 1 for $1.00]
//!      │
//!      ├── 7 / 6 = 1 bundle  → $5.00, remainder 7 % 6 = 1
//!      └── 1 / 1 = 1 bundle  → $1.00, remainder 0
//!      ▼
//! $6.00
//! ```
//! The largest bundle that fits is always exhausted first. This is not an
//! optimal partition search: with sizes {1, 4, 5} and 8 units the result is
//! 5 + 1 + 1 + 1, even if 4 + 4 would be cheaper.

use std::collections::HashMap;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::outcome::ExecutionError;
use crate::validation::{validate_bundle_size, validate_product_id, ValidationResult};

/// Reported when some product has no bundle of size 1.
pub const MISSING_UNIT_PRICE_MESSAGE: &str = "Some of products doesn't have price for single item.";

/// Reported when some rule has a zero or negative bundle price.
pub const NON_POSITIVE_PRICE_MESSAGE: &str = "Some of products has not positive price.";

// =============================================================================
// Pricing Rule
// =============================================================================

/// "`bundle_size` units of `product_id` cost `bundle_price` together."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingRule {
    pub product_id: String,

    #[ts(type = "number")]
    pub bundle_size: NonZeroU32,

    /// Price of the whole bundle, in cents.
    pub bundle_price: Money,
}

impl PricingRule {
    pub fn new(
        product_id: impl Into<String>,
        bundle_size: NonZeroU32,
        bundle_price: Money,
    ) -> Self {
        PricingRule {
            product_id: product_id.into(),
            bundle_size,
            bundle_price,
        }
    }

    /// Builds a size-1 rule (the product's unit price).
    pub fn unit(product_id: impl Into<String>, price: Money) -> Self {
        PricingRule::new(product_id, NonZeroU32::MIN, price)
    }

    /// Builds a rule from raw input, validating the id and bundle size.
    ///
    /// The price is not checked here; non-positive prices are reported by
    /// [`RuleTable::check`] so that every problem in a price list surfaces at once.
    ///
    /// ```rust
    /// use tally_core::money::Money;
    /// use tally_core::pricing::PricingRule;
    ///
    /// let rule = PricingRule::try_new("A", 3, Money::from_cents(300)).unwrap();
    /// assert_eq!(rule.bundle_size.get(), 3);
    /// assert!(PricingRule::try_new("A", 0, Money::from_cents(300)).is_err());
    /// ```
    pub fn try_new(
        product_id: impl Into<String>,
        bundle_size: u32,
        bundle_price: Money,
    ) -> ValidationResult<Self> {
        let product_id = product_id.into();
        validate_product_id(&product_id)?;
        let bundle_size = validate_bundle_size(bundle_size)?;
        Ok(PricingRule::new(product_id, bundle_size, bundle_price))
    }

    #[inline]
    pub fn is_unit_price(&self) -> bool {
        self.bundle_size.get() == 1
    }
}

/// Parses a JSON array of pricing rules, checking every product id.
///
/// ```rust
/// use tally_core::pricing::parse_price_list_json;
///
/// let rules = parse_price_list_json(
///     r#"[{"product_id":"A","bundle_size":1,"bundle_price":125},
///         {"product_id":"A","bundle_size":3,"bundle_price":300}]"#,
/// ).unwrap();
/// assert_eq!(rules.len(), 2);
/// ```
pub fn parse_price_list_json(json: &str) -> CoreResult<Vec<PricingRule>> {
    let rules: Vec<PricingRule> = serde_json::from_str(json)?;
    for rule in &rules {
        validate_product_id(&rule.product_id)?;
    }
    Ok(rules)
}

// =============================================================================
// Line Totals
// =============================================================================

/// One bundle size applied while pricing a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppliedBundle {
    pub bundle_size: u32,
    /// How many times the bundle was applied.
    pub count: u64,
    pub bundle_price: Money,
    pub subtotal: Money,
}

/// Priced quantity of a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineTotal {
    pub product_id: String,
    pub quantity: u64,
    /// Bundles in the order they were applied (largest first).
    pub bundles: Vec<AppliedBundle>,
    /// Units no rule could cover. Always 0 for a table that passed [`RuleTable::check`].
    pub unpriced: u64,
    /// Set when the exact total does not fit in [`Money`]; `total` is then
    /// clamped at [`Money::MAX`] (or [`Money::MIN`] for negative prices).
    pub saturated: bool,
    pub total: Money,
}

// =============================================================================
// Rule Table
// =============================================================================

/// Pricing rules grouped by product, each group ordered by descending bundle size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: HashMap<String, Vec<PricingRule>>,
}

impl RuleTable {
    /// Groups rules by product id and orders each group largest bundle first.
    ///
    /// Rules sharing a product id and bundle size keep their input order; the
    /// first of them wins during pricing.
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = PricingRule>,
    {
        let mut grouped: HashMap<String, Vec<PricingRule>> = HashMap::new();
        for rule in rules {
            grouped.entry(rule.product_id.clone()).or_default().push(rule);
        }

        for group in grouped.values_mut() {
            group.sort_by(|a, b| b.bundle_size.cmp(&a.bundle_size));
        }

        RuleTable { rules: grouped }
    }

    /// Checks the whole table, returning one error per failed condition.
    ///
    /// ## Conditions
    /// 1. Every product has a rule with bundle size 1
    /// 2. Every rule has a price greater than zero
    ///
    /// Both are checked independently, so a table failing both yields
    /// exactly two errors no matter how many rules are at fault.
    pub fn check(&self) -> Vec<ExecutionError> {
        let every_product_has_unit_price = self
            .rules
            .values()
            .all(|group| group.iter().any(PricingRule::is_unit_price));

        let every_price_is_positive = self
            .rules
            .values()
            .flatten()
            .all(|rule| rule.bundle_price.is_positive());

        let mut errors = Vec::new();
        if !every_product_has_unit_price {
            errors.push(ExecutionError::new(MISSING_UNIT_PRICE_MESSAGE));
        }
        if !every_price_is_positive {
            errors.push(ExecutionError::new(NON_POSITIVE_PRICE_MESSAGE));
        }
        errors
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.rules.contains_key(product_id)
    }

    /// Rules for a product, largest bundle first.
    pub fn rules_for(&self, product_id: &str) -> Option<&[PricingRule]> {
        self.rules.get(product_id).map(Vec::as_slice)
    }

    /// Product ids in ascending order.
    pub fn product_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Prices `quantity` units of a product with the greedy decomposition.
    ///
    /// Returns `None` when the product has no rules.
    pub fn price_quantity(&self, product_id: &str, quantity: u64) -> Option<LineTotal> {
        let rules = self.rules.get(product_id)?;

        let mut remaining = quantity;
        let mut bundles = Vec::new();
        let mut total = Money::zero();
        let mut saturated = false;

        // One descending pass leaves fewer units than the smallest bundle size.
        for rule in rules {
            if remaining == 0 {
                break;
            }

            let size = u64::from(rule.bundle_size.get());
            let count = remaining / size;
            if count == 0 {
                continue;
            }

            let subtotal = match rule.bundle_price.checked_mul_quantity(count) {
                Some(subtotal) => subtotal,
                None => {
                    saturated = true;
                    if rule.bundle_price.is_negative() {
                        Money::MIN
                    } else {
                        Money::MAX
                    }
                }
            };
            total = match total.checked_add(subtotal) {
                Some(sum) => sum,
                None => {
                    saturated = true;
                    total.saturating_add(subtotal)
                }
            };
            remaining %= size;

            bundles.push(AppliedBundle {
                bundle_size: rule.bundle_size.get(),
                count,
                bundle_price: rule.bundle_price,
                subtotal,
            });
        }

        if remaining > 0 {
            warn!(
                product_id,
                unpriced = remaining,
                "No bundle covers the remaining units, pricing them at zero"
            );
        }

        if saturated {
            warn!(product_id, quantity, "Line total exceeds the representable amount");
        }

        Some(LineTotal {
            product_id: product_id.to_string(),
            quantity,
            bundles,
            unpriced: remaining,
            saturated,
            total,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
