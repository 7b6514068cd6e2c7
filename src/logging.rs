//! Tracing initialization.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, Once};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

/// Environment variable holding log filter directives
pub const LOG_ENV: &str = "FEATHER_DOCS_LOG";

const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    /// Appended to; used while the TUI owns the terminal
    File(PathBuf),
}

/// Pick filter directives: environment first, then config, then `info`
pub fn filter_directives(env: Option<&str>, config: Option<&str>) -> String {
    env.or(config)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

fn build_filter(config: Option<&str>) -> EnvFilter {
    let env = std::env::var(LOG_ENV).ok();
    let directives = filter_directives(env.as_deref(), config);
    EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("Invalid log filter '{}': {}", directives, e);
        EnvFilter::new(DEFAULT_FILTER)
    })
}

/// Initialize tracing. Safe to call multiple times; only the first call
/// takes effect.
pub fn init(target: LogTarget, config_filter: Option<&str>) {
    INIT.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(build_filter(config_filter))
            .with_ansi(false)
            .with_target(true)
            .with_span_events(FmtSpan::NONE)
            .compact();

        let result = match target {
            LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
            LogTarget::File(path) => {
                match OpenOptions::new().create(true).append(true).open(&path) {
                    Ok(file) => builder.with_writer(Mutex::new(file)).try_init(),
                    Err(e) => {
                        eprintln!("Failed to open log file {}: {}", path.display(), e);
                        return;
                    }
                }
            }
        };

        if let Err(e) = result {
            eprintln!("Failed to initialize tracing: {}", e)
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        assert_eq!(filter_directives(None, None), "info");
        assert_eq!(filter_directives(None, Some("debug")), "debug");
        assert_eq!(
            filter_directives(Some("feather_docs=trace"), Some("debug")),
            "feather_docs=trace"
        );
        assert_eq!(filter_directives(Some("  "), Some("debug")), "info");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(LogTarget::Stderr, Some("warn"));
        init(LogTarget::Stderr, Some("debug"));
        tracing::debug!("still works");
    }
}
