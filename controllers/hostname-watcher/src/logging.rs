//! Log level resolution and subscriber setup.

use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Level used when `LOG_LEVEL` is not set.
pub const DEFAULT_LEVEL: Level = Level::INFO;

/// Level used when `LOG_LEVEL` is set to something unrecognized.
pub const FALLBACK_LEVEL: Level = Level::DEBUG;

/// Maps a `LOG_LEVEL` value to a severity level.
pub fn parse_log_level(value: Option<&str>) -> Level {
    let Some(value) = value else {
        return DEFAULT_LEVEL;
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => FALLBACK_LEVEL,
    }
}

/// Installs the global fmt subscriber filtered at `level`.
pub fn init(level: Level) {
    let filter = EnvFilter::default().add_directive(LevelFilter::from_level(level).into());
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_levels() {
        assert_eq!(parse_log_level(Some("trace")), Level::TRACE);
        assert_eq!(parse_log_level(Some("debug")), Level::DEBUG);
        assert_eq!(parse_log_level(Some("info")), Level::INFO);
        assert_eq!(parse_log_level(Some("warn")), Level::WARN);
        assert_eq!(parse_log_level(Some("warning")), Level::WARN);
        assert_eq!(parse_log_level(Some("error")), Level::ERROR);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(parse_log_level(Some("ERROR")), Level::ERROR);
        assert_eq!(parse_log_level(Some(" Warn ")), Level::WARN);
    }

    #[test]
    fn test_unset_uses_default() {
        assert_eq!(parse_log_level(None), DEFAULT_LEVEL);
    }

    #[test]
    fn test_unrecognized_uses_fallback() {
        assert_eq!(parse_log_level(Some("verbose")), FALLBACK_LEVEL);
        assert_eq!(parse_log_level(Some("")), FALLBACK_LEVEL);
    }
}
