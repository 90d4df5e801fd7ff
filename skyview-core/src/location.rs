//! Best-effort default location from the caller's public IP address.

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::error::LocationError;
use crate::model::Coordinate;

const IPINFO_URL: &str = "https://ipinfo.io/json";

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    /// "latitude,longitude"
    loc: Option<String>,
}

/// Single lookup attempt against ipinfo.io; no retries.
///
/// Any failure is non-fatal by contract: callers treat it as "no default
/// known" and fall back to an explicitly supplied coordinate.
pub async fn resolve_current_location(http: &Client) -> Result<Coordinate, LocationError> {
    resolve_from(http, IPINFO_URL).await
}

/// Same lookup against an explicit endpoint (tests, self-hosted mirrors).
pub async fn resolve_from(http: &Client, url: &str) -> Result<Coordinate, LocationError> {
    let res = http.get(url).send().await?;

    if !res.status().is_success() {
        warn!("ip geolocation lookup returned status {}", res.status());
        return Err(LocationError::Unavailable);
    }

    let body: IpLookupResponse = res.json().await?;

    body.loc.as_deref().and_then(parse_loc).ok_or_else(|| {
        warn!("ip geolocation lookup yielded no coordinates");
        LocationError::Unavailable
    })
}

fn parse_loc(loc: &str) -> Option<Coordinate> {
    let (lat, lon) = loc.split_once(',')?;
    Some(Coordinate::new(
        lat.trim().parse().ok()?,
        lon.trim().parse().ok()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn parse_loc_accepts_a_lat_lon_pair() {
        let coordinate = parse_loc("47.3769,8.5417").expect("well-formed loc");
        assert_eq!(coordinate.lat, 47.3769);
        assert_eq!(coordinate.lon, 8.5417);
    }

    #[test]
    fn parse_loc_tolerates_spaces() {
        let coordinate = parse_loc("47.3769, 8.5417").expect("spaced loc");
        assert_eq!(coordinate.lon, 8.5417);
    }

    #[test]
    fn parse_loc_rejects_garbage() {
        assert!(parse_loc("").is_none());
        assert!(parse_loc("47.3769").is_none());
        assert!(parse_loc("north,south").is_none());
    }

    #[tokio::test]
    async fn resolve_parses_the_loc_field() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "city": "Zurich",
                "loc": "47.3769,8.5417"
            })))
            .mount(&server)
            .await;

        let coordinate = resolve_from(&Client::new(), &server.uri())
            .await
            .expect("lookup should succeed");

        assert_eq!(coordinate.lat, 47.3769);
        assert_eq!(coordinate.lon, 8.5417);
    }

    #[tokio::test]
    async fn missing_loc_is_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"city": "Zurich"})))
            .mount(&server)
            .await;

        let err = resolve_from(&Client::new(), &server.uri()).await.unwrap_err();
        assert!(matches!(err, LocationError::Unavailable));
    }

    #[tokio::test]
    async fn non_success_status_is_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = resolve_from(&Client::new(), &server.uri()).await.unwrap_err();
        assert!(matches!(err, LocationError::Unavailable));
    }
}
