use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Environment variable holding per-target filter directives, e.g.
/// `RESPLINK_LOG=warn,resplink_client=trace` to watch the retry loop only.
pub const LOG_ENV: &str = "RESPLINK_LOG";

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Pick the filter: non-empty `RESPLINK_LOG` directives win over `--log-level`.
fn filter_directives(level: LogLevel, from_env: Option<String>) -> String {
    from_env
        .map(|directives| directives.trim().to_string())
        .filter(|directives| !directives.is_empty())
        .unwrap_or_else(|| level.as_str().to_string())
}

fn build_filter(level: LogLevel, from_env: Option<String>) -> EnvFilter {
    let directives = filter_directives(level, from_env);
    EnvFilter::try_new(&directives).unwrap_or_else(|err| {
        eprintln!("warning: ignoring {LOG_ENV}={directives:?}: {err}");
        EnvFilter::new(level.as_str())
    })
}

/// Diagnostics go to stderr; stdout carries only reply output.
///
/// Text lines keep the emitting crate as target so `RESPLINK_LOG` directives
/// can be written from what is on screen.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let filter = build_filter(level, std::env::var(LOG_ENV).ok());
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true);

    match format {
        LogFormat::Text => {
            let _ = builder.compact().try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().flatten_event(true).try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_flag_is_the_default_filter() {
        assert_eq!(filter_directives(LogLevel::Warn, None), "warn");
        assert_eq!(filter_directives(LogLevel::Trace, Some("  ".into())), "trace");
    }

    #[test]
    fn env_directives_override_level_flag() {
        assert_eq!(
            filter_directives(LogLevel::Warn, Some("warn,resplink_client=trace".into())),
            "warn,resplink_client=trace"
        );
    }

    #[test]
    fn per_target_directive_scopes_retry_events() {
        let filter = build_filter(LogLevel::Error, Some("resplink_client=trace".into()));
        assert_eq!(filter.to_string(), "resplink_client=trace");
    }

    #[test]
    fn invalid_env_directives_fall_back_to_level() {
        let filter = build_filter(LogLevel::Info, Some("resplink_client=loud".into()));
        assert_eq!(filter.to_string(), "info");
    }
}
