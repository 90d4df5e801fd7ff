//! Client for the OpenWeather one-call API.

use reqwest::Client;
use tracing::debug;

use crate::error::WeatherError;
use crate::model::{Coordinate, OneCallResponse, UnitSystem};

const ONECALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";
const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

/// Provider icon URL for an icon identifier such as "01d".
///
/// Fetching and decoding the image stays on the presentation side; the core
/// only resolves the address.
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_URL_BASE}/{icon}.png")
}

/// Stateless request/response client, apart from a last-write-wins slot
/// holding the most recent response per unit system.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
    metric: Option<OneCallResponse>,
    imperial: Option<OneCallResponse>,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, ONECALL_URL.to_string())
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url,
            metric: None,
            imperial: None,
        }
    }

    /// Fetch the full one-call payload for a location.
    ///
    /// A single GET with `{lat, lon, units, appid}` query parameters; no
    /// retry, no fallback. On success the parsed body replaces the cached
    /// response for `units`; the other unit system's slot is untouched.
    pub async fn fetch(
        &mut self,
        location: Coordinate,
        units: UnitSystem,
    ) -> Result<OneCallResponse, WeatherError> {
        debug!("requesting {units} weather for {location}");

        let lat = location.lat.to_string();
        let lon = location.lon.to_string();

        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("units", units.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OneCallResponse = serde_json::from_str(&body)?;

        let slot = match units {
            UnitSystem::Metric => &mut self.metric,
            UnitSystem::Imperial => &mut self.imperial,
        };
        *slot = Some(parsed.clone());

        Ok(parsed)
    }

    /// Most recent successfully fetched response for `units`, if any.
    pub fn cached(&self, units: UnitSystem) -> Option<&OneCallResponse> {
        match units {
            UnitSystem::Metric => self.metric.as_ref(),
            UnitSystem::Imperial => self.imperial.as_ref(),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
