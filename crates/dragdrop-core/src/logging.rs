#![forbid(unsafe_code)]

//! Structured logging.
//!
//! The controller emits `tracing` events under the `dragdrop_core` target:
//!
//! | level   | when                                              |
//! |---------|---------------------------------------------------|
//! | `debug` | controller attach/detach, registration, drag start/stop/cancel |
//! | `trace` | every move (raw, snapped, clamped), unmarked pointer-downs |
//! | `warn`  | unresolvable identifiers, failed lazy registration |
//!
//! The controller logs through the macros re-exported here. Applications
//! install their own subscriber. With the
//! `tracing-subscriber` feature, [`init`] installs a fmt subscriber filtered
//! by the `DRAGDROP_LOG` environment variable.

pub use tracing::{debug, trace, warn};

/// Environment variable read by [`init`].
pub const LOG_ENV: &str = "DRAGDROP_LOG";

/// Filter used when `DRAGDROP_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Install a global fmt subscriber.
///
/// Returns `false` if another global subscriber was already installed.
#[cfg(feature = "tracing-subscriber")]
pub fn init() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(all(test, feature = "tracing-subscriber"))]
mod tests {
    #[test]
    fn init_is_idempotent() {
        let _first = super::init();
        assert!(!super::init());
    }
}
