//! Subscriber setup for the `cogmem` binary.
//!
//! Memory and session events are emitted under the `cogmem_core` target and
//! CLI events under `cogmem`. Without `RUST_LOG`, those two targets log at the
//! requested level while every other crate is held at `warn`.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const OWN_TARGETS: [&str; 2] = ["cogmem_core", "cogmem"];

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    let mut directives = String::from("warn");
    for target in OWN_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` overrides [`default_directives`]. With `json` set, each event
/// is one JSON object per line. A subscriber installed earlier in the
/// process is left in place.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };
    installed.ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_scope_own_targets() {
        assert_eq!(
            default_directives(Level::DEBUG),
            "warn,cogmem_core=debug,cogmem=debug"
        );
        assert_eq!(
            default_directives(Level::INFO),
            "warn,cogmem_core=info,cogmem=info"
        );
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(false, Level::WARN);
        init_tracing(true, Level::DEBUG);
    }
}
