//! Logging initialisation.
//!
//! Structured logs via `tracing-subscriber`. `RUST_LOG` overrides the
//! configured level; HTTP plumbing crates are capped at `warn`.

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Modules whose debug output is connection-level noise.
pub const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

/// Build the filter directive string for a base level.
pub fn filter_directives(log_level: &str) -> String {
    let mut directives = String::from(log_level);
    for module in NOISY_MODULES {
        directives.push_str(&format!(",{}=warn", module));
    }
    directives
}

fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)))
}

/// Initialize logging.
///
/// `log_format` is `"json"` for structured output, anything else for
/// human-readable output. Calling this twice is harmless.
pub fn init_logging(log_level: &str, log_format: &str) {
    let subscriber = tracing_subscriber::registry().with(build_filter(log_level));

    if log_format == "json" {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true);
        let _ = subscriber.with(fmt_layer).try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(true)
            .with_target(true);
        let _ = subscriber.with(fmt_layer).try_init();
    }

    tracing::debug!(log_level = %log_level, log_format = %log_format, "Logging initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cap_noisy_modules() {
        let directives = filter_directives("info");
        assert!(directives.starts_with("info,"));
        assert!(directives.contains("hyper=warn"));
        assert!(directives.contains("reqwest=warn"));
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging("debug", "pretty");
        init_logging("debug", "json");
    }
}
