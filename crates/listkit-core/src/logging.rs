#![forbid(unsafe_code)]

//! Logging and tracing support.
//!
//! This module provides re-exports of tracing macros when the `tracing` feature is enabled.
//! When the feature is disabled, no-op macros are provided for compatibility.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, warn};

// When tracing is not enabled, provide no-op macros
#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op debug_span macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op warn macro when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }
}

// Note: Macros are exported at crate root via #[macro_export],
// so we don't need to re-export noop_macros::* here.

/// A no-op span guard for when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the no-op span (does nothing).
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// A no-op span guard.
#[cfg(not(feature = "tracing"))]
pub struct NoopGuard;

/// Environment variable holding the filter directives for [`init_json_logging`].
#[cfg(feature = "tracing-json")]
pub const LOG_ENV_VAR: &str = "LISTKIT_LOG";

/// Install a JSON `tracing` subscriber for the whole process.
///
/// Filter directives are read from [`LOG_ENV_VAR`]; when it is unset or does
/// not parse, `default_directive` (for example `"listkit_widgets=debug"`) is
/// used instead. Fails if a global subscriber is already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging(
    default_directive: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_env(LOG_ENV_VAR) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directive)?,
    };
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
}
