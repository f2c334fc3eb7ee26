//! Schedule-string parsing for the CLI surface
//!
//! Accepts relative durations ("1h", "30m", "2d"), natural language
//! ("tomorrow", "next tuesday 10am"), and falls back to a default of 24 hours
//! out when the caller schedules without naming a time.

use crate::{QuillcastError, Result};
use chrono::{DateTime, Duration, Utc};

/// Parse a schedule string into a UTC instant.
///
/// # Errors
///
/// Returns `Validation` when the string is empty or matches no supported
/// format.
pub fn parse_schedule(input: &str) -> Result<DateTime<Utc>> {
    if input.trim().is_empty() {
        return Err(QuillcastError::Validation(
            "Schedule string cannot be empty".to_string(),
        ));
    }

    if let Ok(duration) = parse_duration(input) {
        return Ok(Utc::now() + duration);
    }

    if let Ok(dt) = parse_natural_language(input) {
        return Ok(dt);
    }

    Err(QuillcastError::Validation(format!(
        "Could not parse schedule string: {}",
        input
    )))
}

/// Default publish time when the user schedules without picking one
pub fn default_schedule() -> DateTime<Utc> {
    Utc::now() + Duration::hours(24)
}

fn parse_duration(input: &str) -> Result<Duration> {
    if let Ok(std_duration) = humantime::parse_duration(input) {
        let seconds = std_duration.as_secs() as i64;
        return Duration::try_seconds(seconds)
            .ok_or_else(|| QuillcastError::Validation("Duration out of range".to_string()));
    }

    Err(QuillcastError::Validation(format!(
        "Could not parse duration: {}",
        input
    )))
}

fn parse_natural_language(input: &str) -> Result<DateTime<Utc>> {
    chrono_english::parse_date_string(input, Utc::now(), chrono_english::Dialect::Us)
        .map_err(|e| QuillcastError::Validation(format!("Could not parse time: {}", e)))
}
