//! Formatting utilities used for CLI and export outputs.

use chrono::{DateTime, Utc};

/// Duration column of the attendance table.
///
/// - no check-out yet → `Still present`
/// - under an hour   → `42mins`
/// - otherwise       → `2h 5m`
pub fn format_attendance_duration(check_in: &DateTime<Utc>, check_out: Option<&DateTime<Utc>>) -> String {
    let Some(out) = check_out else {
        return "Still present".to_string();
    };

    // round to the nearest minute
    let secs = (*out - *check_in).num_seconds();
    let mins = (secs as f64 / 60.0).round() as i64;

    if mins < 60 {
        return format!("{mins}mins");
    }
    format!("{}h {}m", mins / 60, mins % 60)
}

/// Duration reported after a successful check-out (`attendance.duration`
/// is in minutes): `1h 30m`, or just `45m` below one hour.
pub fn format_checkout_duration(mins: i64) -> String {
    let mins = mins.max(0);
    let hours = mins / 60;
    let minutes = mins % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Average stay on the analytics screen: `0m`, `37m`, or `HH:MM`.
pub fn format_avg_duration(mins: f64) -> String {
    if mins <= 0.0 || mins.is_nan() {
        return "0m".to_string();
    }
    if mins < 60.0 {
        return format!("{}m", mins.round() as i64);
    }
    let hours = (mins / 60.0).floor() as i64;
    let rest = (mins % 60.0).round() as i64;
    format!("{hours:02}:{rest:02}")
}

/// Signed percentage with one decimal, e.g. `+12.5%` or `-3.0%`.
pub fn format_trend(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{pct:.1}%")
    } else {
        format!("{pct:.1}%")
    }
}

/// Hour of day in 12-hour notation: `9AM`, `12PM`, `N/A` when unknown.
pub fn format_hour12(hour: Option<u32>) -> String {
    match hour {
        None => "N/A".to_string(),
        Some(h) => {
            let suffix = if h % 24 >= 12 { "PM" } else { "AM" };
            let h12 = match h % 12 {
                0 => 12,
                other => other,
            };
            format!("{h12}{suffix}")
        }
    }
}

/// `09:00 - 10:00` bucket label of the hourly distribution.
pub fn hour_bucket_label(hour: u32) -> String {
    format!("{:02}:00 - {:02}:00", hour % 24, (hour + 1) % 24)
}

/// `Never`, `Today`, `Yesterday`, `N days ago`.
pub fn format_days_ago(days: Option<i64>) -> String {
    match days {
        None => "Never".to_string(),
        Some(d) if d <= 0 => "Today".to_string(),
        Some(1) => "Yesterday".to_string(),
        Some(d) => format!("{d} days ago"),
    }
}

/// Capitalise the first letter (`week` → `Week`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
