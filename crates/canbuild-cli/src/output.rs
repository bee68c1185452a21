//! Formatted output helpers for CLI commands.
//!
//! Provides ANSI color codes for status lines and human-readable
//! duration formatting.

use std::time::Duration;

/// Bold text.
pub const BOLD: &str = "\x1b[1m";
/// Red foreground.
pub const RED: &str = "\x1b[31m";
/// Green foreground.
pub const GREEN: &str = "\x1b[32m";
/// Yellow foreground.
pub const YELLOW: &str = "\x1b[33m";
/// Blue foreground.
pub const BLUE: &str = "\x1b[34m";
/// Resets all attributes.
pub const RESET: &str = "\x1b[0m";

/// Formats a duration as milliseconds below one second, seconds otherwise.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{millis}ms")
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
