//! Projection of raw one-call entries into flat, display-ready readings.
//!
//! These are pure functions (no I/O): they take a parsed response or one
//! time-slice entry out of it and reshape it per the sparse-record policy.
//! Projection never fails on well-formed input because every field access is
//! presence-checked; only asking for a granularity the response lacks is an
//! error.

use chrono::DateTime;
use serde_json::Value;

use crate::error::WeatherError;
use crate::model::{OneCallResponse, Reading};

/// Entry parameters recognized by the projection, in display order.
const RECOGNIZED_PARAMS: [&str; 12] = [
    "dt",
    "sunrise",
    "sunset",
    "temp",
    "feels_like",
    "pressure",
    "humidity",
    "uvi",
    "visibility",
    "wind_speed",
    "summary",
    "weather",
];

/// Parameters holding epoch seconds, formatted to strings on projection.
const TIMESTAMP_PARAMS: [&str; 3] = ["dt", "sunrise", "sunset"];

/// 12-hour wall-clock with English weekday/month names, e.g.
/// "Tuesday, November 14, 2023 10:13:20".
const TIMESTAMP_FORMAT: &str = "%A, %B %d, %Y %I:%M:%S";

/// Presence predicate for the sparse-record policy: a value counts as present
/// when it is not null, not `false`, not zero and not empty.
///
/// Absent-or-falsy fields are dropped from readings rather than kept as
/// nulls, so a zero temperature is dropped too.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Flatten one raw time-slice entry into a sparse [`Reading`].
///
/// The `weather` parameter projects only its first element's `icon` and
/// `description`, under those renamed keys. Timestamp parameters format as
/// UTC strings; the numeric epoch is not retained. Everything else recognized
/// and present is copied verbatim.
pub fn extract_reading(entry: &Value) -> Reading {
    let mut reading = Reading::new();

    for param in RECOGNIZED_PARAMS {
        let Some(value) = entry.get(param) else {
            continue;
        };
        if !is_present(value) {
            continue;
        }

        if param == "weather" {
            if let Some(first) = value.as_array().and_then(|conditions| conditions.first()) {
                if let Some(icon) = first.get("icon") {
                    reading.insert("icon".to_string(), icon.clone());
                }
                if let Some(description) = first.get("description") {
                    reading.insert("description".to_string(), description.clone());
                }
            }
        } else if TIMESTAMP_PARAMS.contains(&param) {
            if let Some(formatted) = value.as_i64().and_then(format_timestamp) {
                reading.insert(param.to_string(), Value::String(formatted));
            }
        } else {
            reading.insert(param.to_string(), value.clone());
        }
    }

    reading
}

/// Project the `current` time-slice of a response.
pub fn current_weather(response: &OneCallResponse) -> Result<Reading, WeatherError> {
    let entry = response
        .current
        .as_ref()
        .ok_or(WeatherError::MissingSection("current"))?;

    Ok(extract_reading(entry))
}

/// Project every `hourly` entry independently, preserving source order.
pub fn hourly_weather(response: &OneCallResponse) -> Result<Vec<Reading>, WeatherError> {
    let entries = response
        .hourly
        .as_ref()
        .ok_or(WeatherError::MissingSection("hourly"))?;

    Ok(entries.iter().map(extract_reading).collect())
}

/// Project every `daily` entry independently, preserving source order.
pub fn daily_weather(response: &OneCallResponse) -> Result<Vec<Reading>, WeatherError> {
    let entries = response
        .daily
        .as_ref()
        .ok_or(WeatherError::MissingSection("daily"))?;

    Ok(entries.iter().map(extract_reading).collect())
}

fn format_timestamp(epoch: i64) -> Option<String> {
    DateTime::from_timestamp(epoch, 0).map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
}
