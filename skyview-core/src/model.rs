use serde::Deserialize;
use serde_json::Value;
use std::convert::TryFrom;

/// Latitude/longitude pair in decimal degrees.
///
/// No range validation is performed here; out-of-range values propagate to
/// the weather API and surface as an API-level error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// Measurement convention used in API requests and returned magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [UnitSystem] {
        &[UnitSystem::Metric, UnitSystem::Imperial]
    }

    /// Display suffix for temperature magnitudes in this unit system.
    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => " °C",
            UnitSystem::Imperial => " °F",
        }
    }

    /// Display suffix for wind-speed magnitudes in this unit system.
    pub fn wind_suffix(&self) -> &'static str {
        match self {
            UnitSystem::Metric => " m/s",
            UnitSystem::Imperial => " mph",
        }
    }
}

impl std::fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported unit systems: metric, imperial."
            )),
        }
    }
}

/// Parsed one-call response body.
///
/// Only the top-level granularity sections are typed; the entries inside them
/// stay dynamic JSON until projected into a [`Reading`]. A section missing
/// from the body deserializes as `None` and is reported only when a caller
/// asks for that granularity.
#[derive(Debug, Clone, Deserialize)]
pub struct OneCallResponse {
    #[serde(default)]
    pub current: Option<Value>,
    #[serde(default)]
    pub hourly: Option<Vec<Value>>,
    #[serde(default)]
    pub daily: Option<Vec<Value>>,
}

/// Flat, display-ready weather record.
///
/// Sparse: recognized fields that are absent or falsy in the source
/// entry are omitted entirely rather than kept as nulls, so callers must not
/// assume a fixed key set. Iteration order follows the recognized-parameter
/// order (`serde_json` is built with `preserve_order`).
pub type Reading = serde_json::Map<String, Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_system_as_str_roundtrip() {
        for units in UnitSystem::all() {
            let s = units.as_str();
            let parsed = UnitSystem::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*units, parsed);
        }
    }

    #[test]
    fn unit_system_parse_is_case_insensitive() {
        let parsed = UnitSystem::try_from("Imperial").expect("mixed case should parse");
        assert_eq!(parsed, UnitSystem::Imperial);
    }

    #[test]
    fn unknown_unit_system_error() {
        let err = UnitSystem::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn coordinate_displays_four_decimals() {
        let coordinate = Coordinate::new(46.8182, 8.2275);
        assert_eq!(coordinate.to_string(), "46.8182, 8.2275");
    }

    #[test]
    fn missing_sections_deserialize_as_none() {
        let response: OneCallResponse =
            serde_json::from_str(r#"{"current": {"temp": 1.5}}"#).expect("valid body");

        assert!(response.current.is_some());
        assert!(response.hourly.is_none());
        assert!(response.daily.is_none());
    }
}
