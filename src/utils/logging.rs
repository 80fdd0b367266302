// Tue Jan 13 2026 - Alex

use log::LevelFilter;

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs the env_logger backend. Safe to call more than once; later
    /// calls are ignored.
    pub fn init_logger(level: LevelFilter, use_color: bool) {
        let style = if use_color {
            env_logger::WriteStyle::Auto
        } else {
            env_logger::WriteStyle::Never
        };

        let _ = env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .write_style(style)
            .try_init();
    }

    pub fn level_from_str(s: &str) -> LevelFilter {
        match s.to_lowercase().as_str() {
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "info" => LevelFilter::Info,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            "off" => LevelFilter::Off,
            _ => LevelFilter::Info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(LoggingUtils::level_from_str("WARNING"), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_from_str("debug"), LevelFilter::Debug);
        assert_eq!(LoggingUtils::level_from_str("bogus"), LevelFilter::Info);
    }
}
