/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";

/// Trend color:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_trend(value: f64) -> &'static str {
    if value > 0.0 {
        GREEN
    } else if value < 0.0 {
        RED
    } else {
        RESET
    }
}

/// Attendance status badge: closed records green, open ones yellow.
pub fn colorize_status(status: &str) -> String {
    let color = if status == "checked-out" { GREEN } else { YELLOW };
    format!("{color}{status}{RESET}")
}

/// Grey placeholder for missing values (`-`, empty).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
