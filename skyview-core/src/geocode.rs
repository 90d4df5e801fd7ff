//! Reverse geocoding: label a chosen map point with a place name.
//!
//! Backed by Nominatim (OpenStreetMap), which is keyless; failures degrade
//! to no label rather than an error.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::Coordinate;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: Option<ReverseAddress>,
}

#[derive(Debug, Deserialize, Default)]
struct ReverseAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

/// Place label for a coordinate, e.g. "Zürich, Switzerland".
///
/// Returns `None` on any failure; callers fall back to printing the raw
/// coordinate. Nominatim asks for a meaningful User-Agent, so `http` should
/// be built with one.
pub async fn reverse_geocode(http: &Client, location: Coordinate) -> Option<String> {
    let lat = location.lat.to_string();
    let lon = location.lon.to_string();

    let res = http
        .get(NOMINATIM_URL)
        .query(&[
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("format", "json"),
            ("addressdetails", "1"),
            ("zoom", "10"),
        ])
        .send()
        .await
        .ok()?;

    if !res.status().is_success() {
        debug!("reverse geocode returned status {}", res.status());
        return None;
    }

    let body: ReverseResponse = res.json().await.ok()?;
    compose_label(body.address?)
}

/// Prefer city > town > village > municipality for the primary place name,
/// with the state or country appended for disambiguation.
fn compose_label(address: ReverseAddress) -> Option<String> {
    let place = address
        .city
        .or(address.town)
        .or(address.village)
        .or(address.municipality);
    let region = address.state.or(address.country);

    match (place, region) {
        (Some(place), Some(region)) if region != place => Some(format!("{place}, {region}")),
        (Some(place), _) => Some(place),
        (None, Some(region)) => Some(region),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_joins_place_and_region() {
        let label = compose_label(ReverseAddress {
            city: Some("Zürich".to_string()),
            country: Some("Switzerland".to_string()),
            ..Default::default()
        });
        assert_eq!(label.as_deref(), Some("Zürich, Switzerland"));
    }

    #[test]
    fn label_prefers_city_over_town() {
        let label = compose_label(ReverseAddress {
            city: Some("Bern".to_string()),
            town: Some("Köniz".to_string()),
            ..Default::default()
        });
        assert_eq!(label.as_deref(), Some("Bern"));
    }

    #[test]
    fn label_falls_back_to_region_alone() {
        let label = compose_label(ReverseAddress {
            state: Some("Graubünden".to_string()),
            ..Default::default()
        });
        assert_eq!(label.as_deref(), Some("Graubünden"));
    }

    #[test]
    fn label_skips_a_duplicated_region() {
        let label = compose_label(ReverseAddress {
            city: Some("Luxembourg".to_string()),
            country: Some("Luxembourg".to_string()),
            ..Default::default()
        });
        assert_eq!(label.as_deref(), Some("Luxembourg"));
    }

    #[test]
    fn empty_address_has_no_label() {
        assert!(compose_label(ReverseAddress::default()).is_none());
    }
}
