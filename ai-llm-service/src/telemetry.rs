//! Tracing output for model calls.
//!
//! The binary installs its own global subscriber; this module contributes a
//! layer that renders only `ai_llm_service` events (request attempts, retries,
//! latency) in a compact single-line format, plus filter helpers.

use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, filter, fmt};

/// Target prefix of every event emitted by this crate.
pub const TARGET_PREFIX: &str = "ai_llm_service";

/// Second-precision RFC3339 UTC timestamps, e.g. `2025-09-12T10:20:30Z`.
#[derive(Clone, Copy, Debug, Default)]
struct UtcSeconds;

impl FormatTime for UtcSeconds {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        w.write_str(&chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// Formatting layer for this crate's events only.
///
/// Includes `file:line` and closes of instrumented spans (with their
/// duration). Colors are used only when stdout is a terminal.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let only_model_calls = filter::filter_fn(|meta| meta.target().starts_with(TARGET_PREFIX));

    fmt::layer()
        .with_timer(UtcSeconds)
        .with_target(true)
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
        .with_filter(only_model_calls)
}

/// `ai_llm_service=<level>` directive.
pub fn level_directive(level: Level) -> Directive {
    let s = format!("{TARGET_PREFIX}={}", level.as_str().to_lowercase());
    // `<ident>=<level>` always parses; the global level is only a fallback.
    Directive::from_str(&s).unwrap_or_else(|_| LevelFilter::from_level(level).into())
}

/// `RUST_LOG` (or `default` when unset/invalid) with this crate pinned to `level`.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default))
        .add_directive(level_directive(level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_targets_this_crate() {
        assert_eq!(level_directive(Level::DEBUG).to_string(), "ai_llm_service=debug");
    }

    #[test]
    fn env_filter_keeps_crate_directive() {
        let f = env_filter_with_level("warn", Level::INFO);
        assert!(f.to_string().contains("ai_llm_service=info"));
    }
}
