//! # Point-of-Sale Terminal
//!
//! Holds the active rule table and the basket for one register.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Terminal Operations                             │
//! │                                                                         │
//! │  Back office ──► set_pricing(rules) ──► RuleTable replaced              │
//! │                        │                                                │
//! │                        └── Failed(["...single item.", "...positive"])   │
//! │                                                                         │
//! │  Scanner ──────► scan("A") ───────────► basket.push("A")                │
//! │                        │                                                │
//! │                        ├── "" → Failed(null or empty id)                │
//! │                        └── unknown → Failed(No info how much...)        │
//! │                                                                         │
//! │  Tender ───────► calculate_total() ───► Money (never fails)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use tally_core::money::Money;
//! use tally_core::pricing::PricingRule;
//! use tally_core::terminal::Terminal;
//!
//! let mut terminal = Terminal::new();
//! let outcome = terminal.set_pricing(vec![
//!     PricingRule::unit("A", Money::from_cents(125)),
//!     PricingRule::try_new("A", 3, Money::from_cents(300)).unwrap(),
//! ]);
//! assert!(outcome.is_success());
//!
//! for id in ["A", "A", "A", "A"] {
//!     assert!(terminal.scan(id).is_success());
//! }
//! assert_eq!(terminal.calculate_total(), Money::from_cents(425));
//! ```
//!
//! ## Concurrency
//! A terminal is a plain value with no internal locking. Hosts sharing one
//! between threads wrap it in a `Mutex` (single writer at a time).

use tracing::{debug, warn};

use crate::basket::Basket;
use crate::config::{InvalidPricingPolicy, TerminalConfig, TerminalSettings};
use crate::money::Money;
use crate::outcome::{ExecutionError, Outcome};
use crate::pricing::{LineTotal, PricingRule, RuleTable};

/// Reported when `scan` receives an empty id.
pub const EMPTY_PRODUCT_ID_MESSAGE: &str = "Product with null or empty id could not be scanned.";

fn unknown_product_message(product_id: &str) -> String {
    format!(
        "Product with id {} could not be scanned. No info how much does it cost.",
        product_id
    )
}

fn basket_full_message(max: usize) -> String {
    format!("Basket cannot have more than {} items.", max)
}

fn not_in_basket_message(product_id: &str) -> String {
    format!("Product with id {} is not in the basket.", product_id)
}

fn amount_too_large_message(product_id: &str, quantity: u64) -> String {
    format!(
        "Price of {} units of product {} exceeds the supported amount.",
        quantity, product_id
    )
}

// =============================================================================
// Terminal
// =============================================================================

/// A pricing terminal: rule table, basket, and settings.
#[derive(Debug, Clone, Default)]
pub struct Terminal {
    settings: TerminalSettings,
    rules: RuleTable,
    basket: Basket,
}

impl Terminal {
    /// Creates a terminal with default settings, no rules, and an empty basket.
    pub fn new() -> Self {
        Terminal::default()
    }

    pub fn with_settings(settings: TerminalSettings) -> Self {
        Terminal {
            settings,
            ..Terminal::default()
        }
    }

    /// Builds a terminal from config and applies its price list.
    ///
    /// The returned outcome is the result of `set_pricing` on the configured
    /// rules; an empty price list always succeeds.
    pub fn from_config(config: TerminalConfig) -> (Self, Outcome) {
        let mut terminal = Terminal::with_settings(config.terminal);
        let outcome = terminal.set_pricing(config.pricing);
        (terminal, outcome)
    }

    pub fn settings(&self) -> &TerminalSettings {
        &self.settings
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Replaces the pricing rules.
    ///
    /// ## Validation
    /// Two conditions are checked over the whole input, each reported at most once:
    /// - every product has a price for a single item
    /// - every rule has a positive price
    ///
    /// ## Failed Validation
    /// With [`InvalidPricingPolicy::Apply`] (default) the new table is
    /// installed anyway. With [`InvalidPricingPolicy::Reject`] the previous
    /// table is kept.
    pub fn set_pricing<I>(&mut self, rules: I) -> Outcome
    where
        I: IntoIterator<Item = PricingRule>,
    {
        let table = RuleTable::from_rules(rules);
        let errors = table.check();

        if errors.is_empty() {
            debug!(
                terminal = %self.settings.name,
                products = table.len(),
                "Pricing rules replaced"
            );
            self.rules = table;
            return Outcome::Succeeded;
        }

        match self.settings.invalid_pricing {
            InvalidPricingPolicy::Apply => {
                warn!(
                    terminal = %self.settings.name,
                    products = table.len(),
                    failures = errors.len(),
                    "Invalid pricing rules applied"
                );
                self.rules = table;
            }
            InvalidPricingPolicy::Reject => {
                warn!(
                    terminal = %self.settings.name,
                    failures = errors.len(),
                    "Invalid pricing rules rejected, keeping previous table"
                );
            }
        }

        Outcome::failed_with(errors)
    }

    /// The active rule table.
    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Adds one unit of a product to the basket.
    ///
    /// Products without pricing rules are rejected rather than tracked at
    /// zero cost.
    pub fn scan(&mut self, product_id: &str) -> Outcome {
        if product_id.is_empty() {
            warn!(terminal = %self.settings.name, "Rejected scan with empty product id");
            return Outcome::failed(EMPTY_PRODUCT_ID_MESSAGE);
        }

        if !self.rules.contains(product_id) {
            warn!(terminal = %self.settings.name, product_id, "Rejected scan of unpriced product");
            return Outcome::failed(unknown_product_message(product_id));
        }

        if let Some(max) = self.settings.max_basket_size {
            if self.basket.len() >= max {
                warn!(terminal = %self.settings.name, max, "Rejected scan, basket is full");
                return Outcome::failed(basket_full_message(max));
            }
        }

        self.basket.push(product_id);
        debug!(
            terminal = %self.settings.name,
            product_id,
            basket_size = self.basket.len(),
            "Product scanned"
        );
        Outcome::Succeeded
    }

    /// Scans each id in order, collecting every failure.
    ///
    /// Accepted scans stay in the basket even when others fail.
    pub fn scan_all<I, S>(&mut self, product_ids: I) -> Outcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let errors: Vec<ExecutionError> = product_ids
            .into_iter()
            .flat_map(|id| match self.scan(id.as_ref()) {
                Outcome::Failed(errors) => errors,
                _ => Vec::new(),
            })
            .collect();

        Outcome::failed_with(errors)
    }

    /// Removes the most recently scanned unit of a product.
    pub fn void(&mut self, product_id: &str) -> Outcome {
        if self.basket.remove_last(product_id) {
            debug!(terminal = %self.settings.name, product_id, "Scan voided");
            Outcome::Succeeded
        } else {
            Outcome::failed(not_in_basket_message(product_id))
        }
    }

    /// Empties the basket and starts a new session. Rules are kept.
    pub fn reset(&mut self) {
        debug!(
            terminal = %self.settings.name,
            session_id = %self.basket.session_id,
            discarded = self.basket.len(),
            "Basket reset"
        );
        self.basket.clear();
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// How many units of a product are in the basket.
    pub fn quantity_of(&self, product_id: &str) -> u64 {
        self.basket.quantity_of(product_id)
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Total amount due for the basket.
    ///
    /// Each product's scanned quantity is priced with the greedy
    /// largest-bundle-first decomposition; the result is independent of scan
    /// order. An empty basket totals zero. A total too large for [`Money`]
    /// is clamped at [`Money::MAX`] rather than wrapping.
    pub fn calculate_total(&self) -> Money {
        self.breakdown().iter().map(|line| line.total).sum()
    }

    /// Per-product pricing of the basket, ordered by product id.
    ///
    /// Basket entries whose rules were removed by a later `set_pricing` are
    /// left out (they contribute nothing to the total).
    pub fn breakdown(&self) -> Vec<LineTotal> {
        self.basket
            .quantities()
            .into_iter()
            .filter_map(|(product_id, quantity)| {
                let line = self.rules.price_quantity(product_id, quantity);
                if line.is_none() {
                    warn!(
                        terminal = %self.settings.name,
                        product_id,
                        quantity,
                        "Scanned product no longer has pricing rules"
                    );
                }
                line
            })
            .collect()
    }

    /// Prices `quantity` units of a product without touching the basket.
    ///
    /// Fails when the product is unknown or the exact price does not fit in
    /// [`Money`].
    pub fn quote(&self, product_id: &str, quantity: u64) -> Outcome<Money> {
        if product_id.is_empty() {
            return Outcome::failed(EMPTY_PRODUCT_ID_MESSAGE);
        }

        match self.rules.price_quantity(product_id, quantity) {
            Some(line) if line.saturated => {
                Outcome::failed(amount_too_large_message(product_id, quantity))
            }
            Some(line) => Outcome::succeeded_with(line.total),
            None => Outcome::failed(unknown_product_message(product_id)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{MISSING_UNIT_PRICE_MESSAGE, NON_POSITIVE_PRICE_MESSAGE};
    use proptest::prelude::*;

    fn rule(id: &str, size: u32, cents: i64) -> PricingRule {
        PricingRule::try_new(id, size, Money::from_cents(cents)).unwrap()
    }

    fn store_rules() -> Vec<PricingRule> {
        vec![
            rule("A", 1, 125),
            rule("B", 1, 425),
            rule("C", 1, 100),
            rule("D", 1, 75),
            rule("A", 3, 300),
            rule("C", 6, 500),
        ]
    }

    fn store_terminal() -> Terminal {
        let mut terminal = Terminal::new();
        assert!(terminal.set_pricing(store_rules()).is_success());
        terminal
    }

    fn total_for(ids: &str) -> Money {
        let mut terminal = store_terminal();
        for c in ids.chars() {
            assert!(terminal.scan(&c.to_string()).is_success());
        }
        terminal.calculate_total()
    }

    // -------------------------------------------------------------------------
    // set_pricing
    // -------------------------------------------------------------------------

    #[test]
    fn test_set_pricing_valid_rules_succeeds() {
        let mut terminal = Terminal::new();
        let outcome = terminal.set_pricing(vec![
            rule("P1", 1, 10),
            rule("P2", 1, 20),
            rule("P3", 1, 30),
            rule("P4", 1, 40),
            rule("P5", 1, 50),
        ]);
        assert_eq!(outcome, Outcome::Succeeded);
        assert_eq!(terminal.rules().len(), 5);
    }

    #[test]
    fn test_set_pricing_reports_both_failures() {
        let rules = vec![
            rule("P1", 2, 10),
            rule("P2", 3, 0),
            rule("P3", 4, 30),
            rule("P4", 5, 40),
        ];

        let mut terminal = Terminal::new();
        let outcome = terminal.set_pricing(rules.clone());
        assert!(outcome.is_failure());
        assert_eq!(outcome.errors().len(), 2);
        assert!(outcome.messages().contains(&MISSING_UNIT_PRICE_MESSAGE));
        assert!(outcome.messages().contains(&NON_POSITIVE_PRICE_MESSAGE));

        let mut reversed = rules;
        reversed.reverse();
        let outcome = Terminal::new().set_pricing(reversed);
        assert_eq!(outcome.errors().len(), 2);
    }

    #[test]
    fn test_invalid_pricing_applied_by_default() {
        let mut terminal = store_terminal();
        let outcome = terminal.set_pricing(vec![rule("X", 2, 500)]);

        assert_eq!(outcome.messages(), vec![MISSING_UNIT_PRICE_MESSAGE]);
        assert!(terminal.rules().contains("X"));
        assert!(!terminal.rules().contains("A"));
        assert!(terminal.scan("X").is_success());
        assert!(terminal.scan("A").is_failure());
    }

    #[test]
    fn test_invalid_pricing_rejected_keeps_previous_table() {
        let mut terminal = Terminal::with_settings(TerminalSettings {
            invalid_pricing: InvalidPricingPolicy::Reject,
            ..TerminalSettings::default()
        });
        assert!(terminal.set_pricing(store_rules()).is_success());

        let outcome = terminal.set_pricing(vec![rule("X", 1, -100)]);

        assert_eq!(outcome.messages(), vec![NON_POSITIVE_PRICE_MESSAGE]);
        assert!(terminal.rules().contains("A"));
        assert!(!terminal.rules().contains("X"));
    }

    #[test]
    fn test_set_pricing_replaces_previous_table() {
        let mut terminal = store_terminal();
        assert!(terminal.set_pricing(vec![rule("E", 1, 999)]).is_success());
        assert_eq!(terminal.rules().product_ids(), vec!["E"]);
    }

    // -------------------------------------------------------------------------
    // scan
    // -------------------------------------------------------------------------

    #[test]
    fn test_scan_empty_id_fails() {
        let mut terminal = store_terminal();
        let outcome = terminal.scan("");
        assert_eq!(outcome.messages(), vec![EMPTY_PRODUCT_ID_MESSAGE]);
        assert!(terminal.basket().is_empty());

        // Independent of rule table state.
        assert_eq!(
            Terminal::new().scan("").messages(),
            vec![EMPTY_PRODUCT_ID_MESSAGE]
        );
    }

    #[test]
    fn test_scan_unknown_product_fails() {
        let mut terminal = Terminal::new();
        let outcome = terminal.scan("d3b07384-unknown");
        assert_eq!(
            outcome.messages(),
            vec!["Product with id d3b07384-unknown could not be scanned. No info how much does it cost."]
        );
        assert!(terminal.basket().is_empty());
    }

    #[test]
    fn test_scan_known_product_succeeds() {
        let mut terminal = store_terminal();
        assert_eq!(terminal.scan("D"), Outcome::Succeeded);
        assert_eq!(terminal.quantity_of("D"), 1);
        assert_eq!(terminal.calculate_total(), Money::from_cents(75));
    }

    #[test]
    fn test_scan_respects_basket_limit() {
        let mut terminal = Terminal::with_settings(TerminalSettings {
            max_basket_size: Some(2),
            ..TerminalSettings::default()
        });
        assert!(terminal.set_pricing(store_rules()).is_success());

        assert!(terminal.scan("A").is_success());
        assert!(terminal.scan("B").is_success());
        assert_eq!(
            terminal.scan("C").messages(),
            vec!["Basket cannot have more than 2 items."]
        );
        assert_eq!(terminal.basket().len(), 2);
    }

    #[test]
    fn test_scan_all_collects_every_failure() {
        let mut terminal = store_terminal();
        let outcome = terminal.scan_all(["A", "", "Z", "B"]);

        assert_eq!(
            outcome.messages(),
            vec![
                EMPTY_PRODUCT_ID_MESSAGE,
                "Product with id Z could not be scanned. No info how much does it cost.",
            ]
        );
        assert_eq!(terminal.basket().items(), ["A", "B"]);
    }

    #[test]
    fn test_scan_all_success() {
        let mut terminal = store_terminal();
        let ids: Vec<String> = "ABCD".chars().map(String::from).collect();
        assert_eq!(terminal.scan_all(&ids), Outcome::Succeeded);
        assert_eq!(terminal.calculate_total(), Money::from_cents(725));
    }

    // -------------------------------------------------------------------------
    // void / reset
    // -------------------------------------------------------------------------

    #[test]
    fn test_void_removes_one_unit() {
        let mut terminal = store_terminal();
        assert!(terminal.scan_all(["A", "A", "A"]).is_success());
        assert_eq!(terminal.calculate_total(), Money::from_cents(300));

        assert!(terminal.void("A").is_success());
        assert_eq!(terminal.quantity_of("A"), 2);
        assert_eq!(terminal.calculate_total(), Money::from_cents(250));
    }

    #[test]
    fn test_void_missing_product_fails() {
        let mut terminal = store_terminal();
        assert_eq!(
            terminal.void("B").messages(),
            vec!["Product with id B is not in the basket."]
        );
    }

    #[test]
    fn test_reset_clears_basket_but_keeps_rules() {
        let mut terminal = store_terminal();
        assert!(terminal.scan_all(["A", "B"]).is_success());
        let session = terminal.basket().session_id;

        terminal.reset();

        assert!(terminal.basket().is_empty());
        assert_ne!(terminal.basket().session_id, session);
        assert_eq!(terminal.calculate_total(), Money::zero());
        assert!(terminal.scan("A").is_success());
    }

    // -------------------------------------------------------------------------
    // calculate_total
    // -------------------------------------------------------------------------

    #[test]
    fn test_calculate_total_scenarios() {
        let cases = [
            ("ABCDABA", 1325),
            ("CCCCCCC", 600),
            ("ABCD", 725),
            ("DABAABC", 1325),
            ("ABCDABCDABCD", 2100),
            ("BBBBCDBABBDCA", 3575),
            ("CACACACACACBADAABCA", 2425),
        ];

        for (ids, cents) in cases {
            assert_eq!(total_for(ids), Money::from_cents(cents), "basket {}", ids);
        }
    }

    #[test]
    fn test_calculate_total_empty_basket() {
        assert_eq!(store_terminal().calculate_total(), Money::zero());
        assert_eq!(Terminal::new().calculate_total(), Money::zero());
    }

    #[test]
    fn test_calculate_total_does_not_mutate_basket() {
        let mut terminal = store_terminal();
        assert!(terminal.scan_all(["C", "C"]).is_success());
        let first = terminal.calculate_total();
        assert_eq!(terminal.calculate_total(), first);
        assert_eq!(terminal.basket().len(), 2);
    }

    #[test]
    fn test_products_dropped_by_repricing_contribute_nothing() {
        let mut terminal = store_terminal();
        assert!(terminal.scan_all(["A", "B"]).is_success());
        assert!(terminal.set_pricing(vec![rule("B", 1, 400)]).is_success());

        assert_eq!(terminal.calculate_total(), Money::from_cents(400));
        assert_eq!(terminal.breakdown().len(), 1);
    }

    #[test]
    fn test_breakdown_matches_total() {
        let mut terminal = store_terminal();
        assert!(terminal
            .scan_all("CACACACACACBADAABCA".chars().map(String::from))
            .is_success());

        let lines = terminal.breakdown();
        let ids: Vec<&str> = lines.iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);

        let a = &lines[0];
        assert_eq!(a.quantity, 9);
        assert_eq!(a.total, Money::from_cents(900));
        assert_eq!(a.bundles.len(), 1);

        let sum: Money = lines.iter().map(|l| l.total).sum();
        assert_eq!(sum, terminal.calculate_total());
    }

    // -------------------------------------------------------------------------
    // quote / from_config
    // -------------------------------------------------------------------------

    #[test]
    fn test_quote() {
        let terminal = store_terminal();
        assert_eq!(terminal.quote("C", 7).into_value(), Some(Money::from_cents(600)));
        assert_eq!(terminal.quote("C", 0).into_value(), Some(Money::zero()));
        assert_eq!(terminal.quote("", 1).messages(), vec![EMPTY_PRODUCT_ID_MESSAGE]);
        assert!(terminal.quote("Z", 1).is_failure());
        assert!(terminal.basket().is_empty());
    }

    #[test]
    fn test_from_config_applies_price_list() {
        let config = TerminalConfig {
            terminal: TerminalSettings {
                name: "Register 7".to_string(),
                ..TerminalSettings::default()
            },
            pricing: store_rules(),
        };

        let (mut terminal, outcome) = Terminal::from_config(config);

        assert!(outcome.is_success());
        assert_eq!(terminal.settings().name, "Register 7");
        assert!(terminal.scan_all(["C"; 7]).is_success());
        assert_eq!(terminal.calculate_total(), Money::from_cents(600));
    }

    #[test]
    fn test_from_config_reports_invalid_price_list() {
        let config = TerminalConfig {
            pricing: vec![rule("A", 3, 300)],
            ..TerminalConfig::default()
        };
        let (_, outcome) = Terminal::from_config(config);
        assert_eq!(outcome.messages(), vec![MISSING_UNIT_PRICE_MESSAGE]);
    }

    #[test]
    fn test_total_saturates_instead_of_wrapping() {
        let mut terminal = Terminal::new();
        let price = Money::from_cents(i64::MAX / 2 + 1);
        assert!(terminal.set_pricing(vec![PricingRule::unit("A", price)]).is_success());

        assert!(terminal.scan_all(["A", "A"]).is_success());
        let total = terminal.calculate_total();
        assert_eq!(total, Money::MAX);
        assert!(!total.is_negative());
    }

    #[test]
    fn test_total_saturates_across_products() {
        let mut terminal = Terminal::new();
        let price = Money::from_cents(i64::MAX / 2 + 1);
        let outcome = terminal.set_pricing(vec![
            PricingRule::unit("A", price),
            PricingRule::unit("B", price),
        ]);
        assert!(outcome.is_success());

        assert!(terminal.scan_all(["A", "B"]).is_success());
        let lines = terminal.breakdown();
        assert!(lines.iter().all(|line| !line.saturated));
        assert_eq!(terminal.calculate_total(), Money::MAX);
    }

    #[test]
    fn test_quote_fails_when_amount_does_not_fit() {
        let mut terminal = Terminal::new();
        let outcome = terminal.set_pricing(vec![rule("A", 1, 1)]);
        assert!(outcome.is_success());

        let quote = terminal.quote("A", u64::MAX);
        assert!(quote.is_failure());
        assert_eq!(
            quote.messages(),
            vec![format!(
                "Price of {} units of product A exceeds the supported amount.",
                u64::MAX
            )]
        );

        let quote = terminal.quote("A", i64::MAX as u64);
        assert_eq!(quote.value(), Some(&Money::MAX));
    }

    proptest! {
        #[test]
        fn prop_total_is_order_independent(
            (ids, shuffled) in proptest::collection::vec(
                prop::sample::select(vec!["A", "B", "C", "D"]),
                0..40,
            )
            .prop_flat_map(|ids| (Just(ids.clone()), Just(ids).prop_shuffle())),
        ) {
            let mut forward = store_terminal();
            prop_assert!(forward.scan_all(&ids).is_success());

            let mut permuted = store_terminal();
            prop_assert!(permuted.scan_all(&shuffled).is_success());

            prop_assert_eq!(forward.calculate_total(), permuted.calculate_total());
        }

        #[test]
        fn prop_total_never_below_zero(
            ids in proptest::collection::vec(prop::sample::select(vec!["A", "B", "C", "D"]), 0..40),
        ) {
            let mut terminal = store_terminal();
            prop_assert!(terminal.scan_all(&ids).is_success());
            prop_assert!(!terminal.calculate_total().is_negative());
        }
    }
}
