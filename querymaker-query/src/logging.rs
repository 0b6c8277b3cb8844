//! Logging setup.
//!
//! The compiler and assemblers log through `tracing`. Nothing is printed
//! unless a subscriber is installed, either by the application or by
//! [`init`] when the `tracing-subscriber` feature is enabled.
//!
//! # Environment Variables
//!
//! - `QUERYMAKER_DEBUG=true|1|yes` - Enable debug logging
//! - `QUERYMAKER_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `QUERYMAKER_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! ```rust,no_run
//! use querymaker_query::logging;
//!
//! logging::init();
//! ```
//!
//! At `debug` every compiled WHERE clause and assembled statement is
//! logged; at `trace` each criterion and each binding is logged as well.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const DEBUG_VAR: &str = "QUERYMAKER_DEBUG";
const LEVEL_VAR: &str = "QUERYMAKER_LOG_LEVEL";
const FORMAT_VAR: &str = "QUERYMAKER_LOG_FORMAT";

/// Whether `QUERYMAKER_DEBUG` is set to "true", "1" or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var(DEBUG_VAR)
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// The level from `QUERYMAKER_LOG_LEVEL`.
///
/// Unset or unrecognized values fall back to "debug" when debug is enabled,
/// otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    match env::var(LEVEL_VAR) {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

/// The format from `QUERYMAKER_LOG_FORMAT`, defaulting to "json".
pub fn get_log_format() -> &'static str {
    env::var(FORMAT_VAR)
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Filter directive covering both querymaker crates at `level`.
pub fn filter_directive(level: &str) -> String {
    format!("querymaker={},querymaker_query={}", level, level)
}

/// Install the global subscriber once.
///
/// Does nothing unless `QUERYMAKER_DEBUG` or `QUERYMAKER_LOG_LEVEL` is set.
/// Without the `tracing-subscriber` feature this is always a no-op.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var(LEVEL_VAR).is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(filter_directive(level))
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            // try_init: the application may already own the global subscriber
            let installed = match get_log_format() {
                "json" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .try_init(),
                "compact" => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().compact())
                    .try_init(),
                _ => tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().pretty())
                    .try_init(),
            };

            if installed.is_ok() {
                tracing::info!(level = level, format = get_log_format(), "querymaker logging initialized");
            }
        }
    });
}

/// Set `QUERYMAKER_LOG_LEVEL` and call [`init`].
///
/// # Safety
///
/// This modifies environment variables, which is unsafe in multi-threaded
/// programs. Call it at startup before spawning threads.
pub fn init_with_level(level: &str) {
    // SAFETY: documented as startup-only.
    unsafe {
        env::set_var(LEVEL_VAR, level);
    }
    init();
}

/// Set `QUERYMAKER_DEBUG=true` and call [`init`].
///
/// # Safety
///
/// Same caveat as [`init_with_level`].
pub fn init_debug() {
    // SAFETY: documented as startup-only.
    unsafe {
        env::set_var(DEBUG_VAR, "true");
    }
    init();
}

/// `tracing::debug!` gated on `QUERYMAKER_DEBUG` at runtime.
#[macro_export]
macro_rules! querymaker_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// `tracing::trace!` gated on `QUERYMAKER_DEBUG` at runtime.
#[macro_export]
macro_rules! querymaker_trace {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::trace!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        // SAFETY: these variables are only touched by this test
        unsafe {
            env::remove_var(DEBUG_VAR);
            env::remove_var(LEVEL_VAR);
            env::remove_var(FORMAT_VAR);
        }
        assert!(!is_debug_enabled());
        assert_eq!(get_log_level(), "warn");
        assert_eq!(get_log_format(), "json");
    }

    #[test]
    fn test_filter_directive() {
        assert_eq!(
            filter_directive("trace"),
            "querymaker=trace,querymaker_query=trace"
        );
    }
}
