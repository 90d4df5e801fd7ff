use reqwest::StatusCode;
use thiserror::Error;

/// Failure while resolving a default location from the caller's IP address.
///
/// Non-fatal by contract: callers treat any of these as "no default known"
/// and fall back to an explicitly supplied coordinate.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location lookup request failed: {0}")]
    Lookup(#[from] reqwest::Error),

    #[error("location lookup returned no usable coordinates")]
    Unavailable,
}

/// Failure while fetching weather data or projecting a granularity out of it.
///
/// Fetch failures are surfaced as-is, with no retry or fallback; deciding
/// whether to keep showing stale data is the caller's job.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather API returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse weather API response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weather response has no \"{0}\" section")]
    MissingSection(&'static str),
}
