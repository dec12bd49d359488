//! # tally-core: Point-of-Sale Pricing Terminal
//!
//! Prices a basket of scanned products against per-product bundle rules
//! ("1 for $1.25, 3 for $3.00") and reports the total due.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tally POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host application                             │   │
//! │  │    Scanner input ──► Basket UI ──► Tender UI                    │   │
//! │  │    (injects its own Logger, owns currency formatting)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tally-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ terminal  │  │  pricing  │  │  basket   │  │  outcome  │  │   │
//! │  │   │ set_price │  │ RuleTable │  │  Basket   │  │  Outcome  │  │   │
//! │  │   │ scan/total│  │  greedy   │  │  session  │  │  errors   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   money • config • logging • validation • error                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`terminal`] - The `Terminal`: set pricing, scan, calculate total
//! - [`pricing`] - Pricing rules, rule table, bundle decomposition
//! - [`basket`] - Scanned products for one checkout session
//! - [`outcome`] - `Outcome` / `ExecutionError` for expected failures
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`config`] - Terminal settings from TOML and environment
//! - [`logging`] - Injected `Logger` capability and tracing setup
//! - [`validation`] - Field validators
//! - [`error`] - Infrastructure error types
//!
//! ## Design Principles
//!
//! 1. **No Panics on Bad Input**: invalid price lists and scans return `Outcome::Failed`
//! 2. **Integer Money**: all monetary values are in cents (i64)
//! 3. **Order Independence**: a basket's total depends only on how many of each product were scanned
//! 4. **Single Writer**: a `Terminal` has no internal locking
//!
//! ## Example Usage
//!
//! ```rust
//! use tally_core::{Money, PricingRule, Terminal};
//!
//! let mut terminal = Terminal::new();
//! let outcome = terminal.set_pricing(vec![
//!     PricingRule::unit("C", Money::from_cents(100)),
//!     PricingRule::try_new("C", 6, Money::from_cents(500)).unwrap(),
//! ]);
//! assert!(outcome.is_success());
//!
//! assert!(terminal.scan_all(["C"; 7]).is_success());
//! assert_eq!(terminal.calculate_total(), Money::from_cents(600));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod basket;
pub mod config;
pub mod error;
pub mod logging;
pub mod money;
pub mod outcome;
pub mod pricing;
pub mod terminal;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use basket::Basket;
pub use config::{InvalidPricingPolicy, TerminalConfig, TerminalSettings};
pub use error::{CoreError, CoreResult, ValidationError};
pub use logging::{Logger, TracingLogger};
pub use money::Money;
pub use outcome::{ExecutionError, Outcome};
pub use pricing::{AppliedBundle, LineTotal, PricingRule, RuleTable};
pub use terminal::Terminal;
