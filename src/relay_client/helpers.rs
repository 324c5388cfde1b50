use chrono::{DateTime, Utc};

/// Countdown window the device works with: 40 minutes.
pub const COUNTDOWN_WINDOW_SECS: u64 = 40 * 60;

/// Render seconds as `MM:SS`. Minutes keep growing past 59 instead of
/// wrapping into hours, so 3600 renders as `60:00`.
pub fn format_time(seconds: u64) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{mins:02}:{secs:02}")
}

/// Fraction of the 40 minute window still remaining. Not clamped: a device
/// reporting more than 40 minutes yields a value above 1.0.
pub fn progress_ratio(seconds: u64) -> f64 {
    seconds as f64 / COUNTDOWN_WINDOW_SECS as f64
}

/// Human readable age of the last successful contact with the device.
pub fn format_last_contact(last: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(last);
    if elapsed.num_seconds() < 2 {
        "just now".to_string()
    } else if elapsed.num_seconds() < 60 {
        format!("{} s ago", elapsed.num_seconds())
    } else if elapsed.num_minutes() < 60 {
        format!("{} min ago", elapsed.num_minutes())
    } else {
        format!("{} h ago", elapsed.num_hours())
    }
}
