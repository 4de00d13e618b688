//! Human-readable time formatting for seek indicators.

/// Format a duration in milliseconds as `"mm:ss"`, or `"h:mm:ss"` at one
/// hour and above. Negative input clamps to zero.
pub fn format_duration(ms: i64) -> String {
    let total_seconds = ms.max(0) / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Format a `position / duration` pair, e.g. `"00:15 / 01:00"`.
pub fn format_position(position_ms: i64, duration_ms: i64) -> String {
    format!(
        "{} / {}",
        format_duration(position_ms),
        format_duration(duration_ms)
    )
}
