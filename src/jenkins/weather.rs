//! Weather mapping and duration/timestamp formatting.
//!
//! The dashboard renders job stability as weather. Two sources feed it:
//! the ball color on list views, and the health-report score (0-100) on
//! folder job listings.

/// Placeholder for absent builds and zero timestamps.
pub const NOT_AVAILABLE: &str = "N/A";

/// Maps a Jenkins ball color to a weather label.
pub fn weather_by_color(color: &str) -> &'static str {
    match color {
        "blue" | "green" => "sunny",
        "yellow" => "cloudy",
        "red" => "storm",
        "notbuilt" | "grey" => "fog",
        "aborted" => "windy",
        "disabled" => "disabled",
        _ => "unknown",
    }
}

/// Maps a health-report score to a weather label.
pub fn weather_by_health(score: i64) -> &'static str {
    match score {
        s if s >= 80 => "sunny",
        s if s >= 60 => "partly-sunny",
        s if s >= 40 => "cloudy",
        s if s >= 20 => "rain",
        s if s >= 0 => "storm",
        _ => "unknown",
    }
}

/// Millisecond epoch timestamp to `%Y-%m-%d %H:%M:%S`, "N/A" for zero.
pub fn format_timestamp_ms(timestamp: i64) -> String {
    if timestamp == 0 {
        return NOT_AVAILABLE.to_string();
    }
    match chrono::DateTime::from_timestamp_millis(timestamp) {
        Some(dt) => dt
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Millisecond duration to a human string: "2 hr 5 min", "3 min 20 sec",
/// or "4.5 sec" under a minute.
pub fn format_duration_ms(ms: i64) -> String {
    let total_secs = ms as f64 / 1000.0;
    let hours = ms / 3_600_000;
    let minutes = (ms / 60_000) % 60;
    let seconds = (ms / 1000) % 60;

    if hours > 0 {
        format!("{hours} hr {minutes} min")
    } else if minutes > 0 {
        format!("{minutes} min {seconds} sec")
    } else {
        format!("{total_secs:.1} sec")
    }
}
