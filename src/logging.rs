//! Tracing setup for the binary.
//!
//! Log lines always go to stderr; stdout belongs to the external tools.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Target of the computed-version event, which is never filtered out
pub const VERSION_TARGET: &str = "release_selector::version";

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "release_selector=trace"
    } else {
        "release_selector=info"
    }
}

/// Directives for the subscriber, given the value of `RUST_LOG`
///
/// `RUST_LOG` replaces the default level, but `--debug` still raises this
/// crate to `trace` and the computed version is always let through.
pub fn filter_directives(debug: bool, rust_log: Option<&str>) -> String {
    let mut directives = match rust_log.map(str::trim) {
        Some(env) if !env.is_empty() => {
            let mut directives = env.to_string();
            if debug {
                directives.push(',');
                directives.push_str(default_filter(true));
            }
            directives
        }
        _ => default_filter(debug).to_string(),
    };

    directives.push_str(&format!(",{}=info", VERSION_TARGET));
    directives
}

/// Build the filter; an unparsable `RUST_LOG` falls back to the defaults
pub fn build_filter(debug: bool, rust_log: Option<&str>) -> EnvFilter {
    EnvFilter::try_new(filter_directives(debug, rust_log))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(debug, None)))
}

/// Install the global subscriber. Only the first call takes effect.
pub fn init_tracing(debug: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(build_filter(debug, rust_log.as_deref()))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(debug)
                .without_time(),
        )
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::{Layer, Registry};

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(true), "release_selector=trace");
        assert_eq!(default_filter(false), "release_selector=info");
    }

    #[test]
    fn test_directives_without_rust_log() {
        assert_eq!(
            filter_directives(false, None),
            "release_selector=info,release_selector::version=info"
        );
        assert_eq!(
            filter_directives(true, Some("  ")),
            "release_selector=trace,release_selector::version=info"
        );
    }

    #[test]
    fn test_debug_applies_on_top_of_rust_log() {
        assert_eq!(
            filter_directives(true, Some("warn")),
            "warn,release_selector=trace,release_selector::version=info"
        );
        assert_eq!(
            filter_directives(false, Some("warn")),
            "warn,release_selector::version=info"
        );
    }

    #[test]
    fn test_version_survives_rust_log_off() {
        let filter = build_filter(false, Some("off"));
        assert_eq!(
            <EnvFilter as Layer<Registry>>::max_level_hint(&filter),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(false);
        init_tracing(true);
    }
}
