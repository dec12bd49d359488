//! # Terminal Configuration
//!
//! Terminal settings and an optional starting price list.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TALLY_TERMINAL_NAME=register-1                                     │
//! │     TALLY_INVALID_PRICING=reject                                       │
//! │     TALLY_MAX_BASKET_SIZE=200                                          │
//! │                                                                         │
//! │  2. TOML Config File (path supplied by the host)                       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     invalid_pricing = apply, no basket limit, empty price list         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [terminal]
//! name = "Register 1"
//! invalid_pricing = "reject"   # apply | reject
//! max_basket_size = 200
//!
//! [[pricing]]
//! product_id = "A"
//! bundle_size = 1
//! bundle_price = 125           # cents
//!
//! [[pricing]]
//! product_id = "A"
//! bundle_size = 3
//! bundle_price = 300
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::pricing::PricingRule;
use crate::validation::{validate_max_basket_size, validate_product_id};

// =============================================================================
// Invalid Pricing Policy
// =============================================================================

/// What `set_pricing` does with a price list that fails validation.
///
/// ## Policy Behavior
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  APPLY (Default)                                                        │
/// │  • The new table is installed even though Failed is returned           │
/// │  • Scans of products in the new list are accepted                      │
/// │  • Matches long-standing register behavior                             │
/// │                                                                         │
/// │  REJECT                                                                 │
/// │  • The previous table stays in place                                   │
/// │  • Failed is returned with the same messages                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidPricingPolicy {
    #[default]
    Apply,
    Reject,
}

impl std::fmt::Display for InvalidPricingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidPricingPolicy::Apply => write!(f, "apply"),
            InvalidPricingPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for InvalidPricingPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apply" => Ok(InvalidPricingPolicy::Apply),
            "reject" | "keep_previous" => Ok(InvalidPricingPolicy::Reject),
            other => Err(CoreError::InvalidConfig(format!(
                "Unknown invalid pricing policy: '{}'. Valid options: apply, reject",
                other
            ))),
        }
    }
}

// =============================================================================
// Terminal Settings
// =============================================================================

/// Runtime behavior of a [`crate::terminal::Terminal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSettings {
    /// Human-readable terminal name, used in log events.
    #[serde(default = "default_terminal_name")]
    pub name: String,

    #[serde(default)]
    pub invalid_pricing: InvalidPricingPolicy,

    /// Upper bound on scanned units per basket. `None` means unlimited.
    #[serde(default)]
    pub max_basket_size: Option<usize>,
}

fn default_terminal_name() -> String {
    "POS Terminal".to_string()
}

impl Default for TerminalSettings {
    fn default() -> Self {
        TerminalSettings {
            name: default_terminal_name(),
            invalid_pricing: InvalidPricingPolicy::default(),
            max_basket_size: None,
        }
    }
}

// =============================================================================
// Terminal Config
// =============================================================================

/// Complete terminal configuration: settings plus the starting price list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalConfig {
    #[serde(default)]
    pub terminal: TerminalSettings,

    #[serde(default)]
    pub pricing: Vec<PricingRule>,
}

impl TerminalConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (if `config_path` is given and exists)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading terminal config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load terminal config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses and validates a TOML document. Environment overrides are not applied.
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> CoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validates the configuration.
    ///
    /// Price-list business rules (unit price present, prices positive) are
    /// not checked here; they surface from `set_pricing` as an `Outcome`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.terminal.name.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "terminal name must not be empty".into(),
            ));
        }

        validate_max_basket_size(self.terminal.max_basket_size)?;

        for rule in &self.pricing {
            validate_product_id(&rule.product_id)?;
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("TALLY_TERMINAL_NAME") {
            debug!(name = %name, "Overriding terminal name from environment");
            self.terminal.name = name;
        }

        if let Ok(policy) = std::env::var("TALLY_INVALID_PRICING") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding invalid pricing policy from environment");
                    self.terminal.invalid_pricing = parsed;
                }
                Err(_) => warn!(policy = %policy, "Unknown invalid pricing policy in environment"),
            }
        }

        if let Ok(limit) = std::env::var("TALLY_MAX_BASKET_SIZE") {
            match limit.parse::<usize>() {
                Ok(parsed) => self.terminal.max_basket_size = Some(parsed),
                Err(_) => warn!(limit = %limit, "Invalid basket size limit in environment"),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
