//! Human-friendly durations for the config file: `"500ms"`, `"20s"`, `"5m"`,
//! `"24h"`, `"1d"`, or a bare number of seconds.

use std::time::Duration;

/// Parse interval string like "20s", "30m", "24h", "1d" or "250ms"
pub fn parse_interval(s: &str) -> Result<Duration, String> {
    let s = s.trim().to_lowercase();

    if let Some(millis) = s.strip_suffix("ms") {
        millis
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| format!("Invalid milliseconds: {}", millis))
    } else if let Some(hours) = s.strip_suffix('h') {
        let hours = hours
            .parse::<u64>()
            .map_err(|_| format!("Invalid hours: {}", hours))?;
        scaled(hours, 3600, &s)
    } else if let Some(minutes) = s.strip_suffix('m') {
        let minutes = minutes
            .parse::<u64>()
            .map_err(|_| format!("Invalid minutes: {}", minutes))?;
        scaled(minutes, 60, &s)
    } else if let Some(days) = s.strip_suffix('d') {
        let days = days
            .parse::<u64>()
            .map_err(|_| format!("Invalid days: {}", days))?;
        scaled(days, 86400, &s)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| format!("Invalid seconds: {}", secs))
    } else {
        s.parse::<u64>().map(Duration::from_secs).map_err(|_| {
            format!(
                "Invalid interval: {}. Use format like '20s', '5m', '24h'",
                s
            )
        })
    }
}

fn scaled(count: u64, unit_secs: u64, s: &str) -> Result<Duration, String> {
    count
        .checked_mul(unit_secs)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("Interval too large: {}", s))
}

/// Format interval for display
pub fn format_interval(duration: Duration) -> String {
    if duration.subsec_millis() != 0 {
        return format!("{}ms", duration.as_millis());
    }

    let secs = duration.as_secs();
    if secs >= 86400 && secs % 86400 == 0 {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

/// Serde adapter for `Duration` fields, used as `#[serde(with = "interval::human")]`.
pub mod human {
    use std::time::Duration;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Secs(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_interval(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Secs(secs) => Ok(Duration::from_secs(secs)),
            Raw::Text(text) => super::parse_interval(&text).map_err(D::Error::custom),
        }
    }
}
