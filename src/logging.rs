//! Tracing setup for the desktop binary.
//!
//! `RUST_LOG` wins when set; otherwise this crate logs at `info`
//! (`debug` when verbose) and everything else at `warn`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,community_atlas=debug"
    } else {
        "warn,community_atlas=info"
    }
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_parse() {
        for verbose in [false, true] {
            assert!(default_directive(verbose).parse::<EnvFilter>().is_ok());
        }
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false);
        init(true);
    }
}
