//! Diagnostic output for the favicon pipeline.
//!
//! Every line the plugin prints goes through this module so the host's
//! console shows one consistent shape:
//!
//! ```text
//! ✅ favicon-factory - output folder created. Processing favicons...
//! ❌ favicon-factory - file static/logo.svg does not exist
//! 📣 favicon-factory - something worth noticing
//! ```
//!
//! # Architecture
//!
//! [`format_log_line`] is pure and returns the finished line, so tests can
//! assert on exact output. [`log`] and the level shorthands write it to
//! stderr, keeping stdout free for whatever the host build prints.

/// Prefix shown after the icon on every line.
const LABEL: &str = "favicon-factory";

/// Used when a caller passes an empty message.
const FALLBACK_MESSAGE: &str = "OPS! An error has occurred";

/// Severity of a diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Info,
    Error,
    #[default]
    Notice,
}

impl LogLevel {
    fn icon(self) -> &'static str {
        match self {
            LogLevel::Info => "✅",
            LogLevel::Error => "❌",
            LogLevel::Notice => "📣",
        }
    }
}

/// Format a diagnostic line: `<icon> favicon-factory - <message>`.
pub fn format_log_line(level: LogLevel, message: &str) -> String {
    let message = if message.is_empty() {
        FALLBACK_MESSAGE
    } else {
        message
    };
    format!("{} {} - {}", level.icon(), LABEL, message)
}

/// Write a diagnostic line to stderr.
pub fn log(level: LogLevel, message: &str) {
    eprintln!("{}", format_log_line(level, message));
}

pub fn info(message: &str) {
    log(LogLevel::Info, message);
}

pub fn error(message: &str) {
    log(LogLevel::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_line_uses_check_icon() {
        assert_eq!(
            format_log_line(LogLevel::Info, "manifest.json created successfully"),
            "✅ favicon-factory - manifest.json created successfully"
        );
    }

    #[test]
    fn error_line_uses_cross_icon() {
        assert_eq!(
            format_log_line(LogLevel::Error, "boom"),
            "❌ favicon-factory - boom"
        );
    }

    #[test]
    fn default_level_is_notice() {
        assert_eq!(LogLevel::default(), LogLevel::Notice);
        assert!(format_log_line(LogLevel::default(), "hi").starts_with("📣 "));
    }

    #[test]
    fn empty_message_falls_back() {
        assert_eq!(
            format_log_line(LogLevel::Error, ""),
            "❌ favicon-factory - OPS! An error has occurred"
        );
    }
}
