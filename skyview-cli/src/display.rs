//! Human-friendly rendering of readings.

use serde_json::Value;
use skyview_core::{Reading, UnitSystem, icon_url};

/// Print one `Label: value[ suffix]` line per present field, in reading order.
///
/// Readings are sparse, so absent fields simply produce no line. The icon
/// identifier renders as the provider icon URL.
pub fn print_reading(reading: &Reading, units: UnitSystem) {
    for (key, value) in reading {
        if key == "icon" {
            if let Some(icon) = value.as_str() {
                println!("{}: {}", label(key), icon_url(icon));
            }
            continue;
        }

        println!("{}: {}{}", label(key), render(value), unit_suffix(key, units));
    }
}

fn label(key: &str) -> &str {
    match key {
        "dt" => "Time",
        "sunrise" => "Sunrise",
        "sunset" => "Sunset",
        "temp" => "Temperature",
        "feels_like" => "Feels like",
        "pressure" => "Pressure",
        "humidity" => "Humidity",
        "uvi" => "UV index",
        "visibility" => "Visibility",
        "wind_speed" => "Wind speed",
        "summary" => "Summary",
        "icon" => "Icon",
        "description" => "Description",
        other => other,
    }
}

fn unit_suffix(key: &str, units: UnitSystem) -> &'static str {
    match key {
        "temp" | "feels_like" => units.temperature_suffix(),
        "wind_speed" => units.wind_suffix(),
        "pressure" => " hPa",
        "humidity" => " %",
        "visibility" => " m",
        _ => "",
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_render_without_quotes() {
        assert_eq!(render(&json!("clear sky")), "clear sky");
        assert_eq!(render(&json!(15.2)), "15.2");
        assert_eq!(render(&json!(60)), "60");
    }

    #[test]
    fn suffixes_follow_the_unit_system() {
        assert_eq!(unit_suffix("temp", UnitSystem::Metric), " °C");
        assert_eq!(unit_suffix("temp", UnitSystem::Imperial), " °F");
        assert_eq!(unit_suffix("wind_speed", UnitSystem::Metric), " m/s");
        assert_eq!(unit_suffix("wind_speed", UnitSystem::Imperial), " mph");
        assert_eq!(unit_suffix("description", UnitSystem::Metric), "");
    }

    #[test]
    fn recognized_keys_have_labels() {
        assert_eq!(label("feels_like"), "Feels like");
        assert_eq!(label("uvi"), "UV index");
        assert_eq!(label("something_else"), "something_else");
    }
}
