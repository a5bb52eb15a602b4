//! Tracing subscriber initialisation.
//!
//! Development gets human-readable output at `debug`; every other mode logs
//! JSON at `info`. `RUST_LOG` overrides the default filter.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::RuntimeMode;

/// Filter directive used when `RUST_LOG` is unset.
#[must_use]
pub const fn default_directive(mode: RuntimeMode) -> &'static str {
    if mode.is_development() { "debug" } else { "info" }
}

fn env_filter(mode: RuntimeMode) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(mode)))
}

/// Install the global subscriber. Later calls are ignored with a warning.
pub fn init_tracing(mode: RuntimeMode) {
    let builder = fmt().with_env_filter(env_filter(mode));
    let result = if mode.is_development() {
        builder.pretty().try_init()
    } else {
        builder.json().try_init()
    };
    if let Err(error) = result {
        warn!(%error, "tracing init failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RuntimeMode::Development, "debug")]
    #[case(RuntimeMode::Test, "info")]
    #[case(RuntimeMode::Staging, "info")]
    #[case(RuntimeMode::Production, "info")]
    fn default_directive_follows_mode(#[case] mode: RuntimeMode, #[case] expected: &str) {
        assert_eq!(default_directive(mode), expected);
    }
}
