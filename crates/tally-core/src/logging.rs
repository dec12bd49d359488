//! # Logging
//!
//! The terminal itself emits `tracing` events. Host applications that want
//! to route terminal outcomes into their own log pipeline inject a
//! [`Logger`]; [`TracingLogger`] is the default implementation.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - every scan and pricing change
//! - `RUST_LOG=tally_core=warn` - rejected scans and invalid price lists only
//! - Default (see [`init_tracing`]): `info,tally_core=debug`

use tracing::{error, info, warn};

/// Logging capability injected by the host application.
pub trait Logger {
    fn info(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);

    /// Logs an error value together with a description of what was attempted.
    fn exception(&self, err: &dyn std::error::Error, message: &str);
}

/// [`Logger`] that forwards to `tracing`, tagging events with a component name.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    component: String,
}

impl TracingLogger {
    pub fn new(component: impl Into<String>) -> Self {
        TracingLogger {
            component: component.into(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        TracingLogger::new("terminal")
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(component = %self.component, "{}", message);
    }

    fn warning(&self, message: &str) {
        warn!(component = %self.component, "{}", message);
    }

    fn error(&self, message: &str) {
        error!(component = %self.component, "{}", message);
    }

    fn exception(&self, err: &dyn std::error::Error, message: &str) {
        error!(component = %self.component, error = %err, "{}", message);
    }
}

/// Initializes a process-wide tracing subscriber for host applications.
///
/// Safe to call multiple times (subsequent calls are no-ops).
#[cfg(feature = "subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally_core=debug"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

// =============================================================================
// Unit Tests
// =============================================================================
