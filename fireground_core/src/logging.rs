//! Logging setup for the Fireground binaries.
//!
//! Logs go to stderr so program listings on stdout stay clean.

use crate::{Error, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when it holds a valid filter; otherwise `default_directive`
/// applies (`warn`, `fireground_core=debug`, ...).
pub fn init(default_directive: &str) -> Result<()> {
    let env = std::env::var("RUST_LOG").ok();
    let filter = build_filter(env.as_deref(), default_directive)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| Error::Config(format!("logging already initialized: {}", e)))
}

fn build_filter(env: Option<&str>, default_directive: &str) -> Result<EnvFilter> {
    if let Some(directive) = env.filter(|d| !d.trim().is_empty()) {
        match EnvFilter::try_new(directive) {
            Ok(filter) => return Ok(filter),
            Err(e) => eprintln!("Ignoring RUST_LOG '{}': {}", directive, e),
        }
    }

    EnvFilter::try_new(default_directive).map_err(|e| {
        Error::Config(format!("invalid log filter '{}': {}", default_directive, e))
    })
}

/// Route engine logs into the test harness output
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_env_filter_wins() {
        let filter = build_filter(Some("debug"), "warn").unwrap();
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_default_used_when_env_missing_or_invalid() {
        let filter = build_filter(None, "warn").unwrap();
        assert_eq!(filter.to_string(), "warn");

        let filter = build_filter(Some("  "), "warn").unwrap();
        assert_eq!(filter.to_string(), "warn");

        let filter = build_filter(Some("fireground_core=loud"), "warn").unwrap();
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_invalid_default_is_config_error() {
        let err = build_filter(None, "fireground_core=loud").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
