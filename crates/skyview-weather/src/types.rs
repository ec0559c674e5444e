use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Temperature unit used when presenting a stored Celsius value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// The other unit
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }

    /// Express a Celsius temperature in this unit
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Convert a temperature in this unit back to Celsius
    pub fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }
}

/// Render a stored Celsius value in the given unit, e.g. `18.2°C`
pub fn format_temperature(celsius: f64, unit: TemperatureUnit) -> String {
    format!("{:.1}°{}", unit.from_celsius(celsius), unit.symbol())
}

/// Weather categories used to pick a background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCategory {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Clear,
    Clouds,
    Mist,
    Smoke,
    Haze,
    Fog,
}

impl WeatherCategory {
    pub const ALL: [WeatherCategory; 10] = [
        Self::Thunderstorm,
        Self::Drizzle,
        Self::Rain,
        Self::Snow,
        Self::Clear,
        Self::Clouds,
        Self::Mist,
        Self::Smoke,
        Self::Haze,
        Self::Fog,
    ];

    /// Map a WMO weather code (as reported by Open-Meteo) to a category.
    /// See: https://open-meteo.com/en/docs#weathervariables
    ///
    /// Mist, Smoke and Haze have no WMO code in this scheme.
    pub fn from_wmo_code(code: i32) -> Option<Self> {
        match code {
            0 | 1 => Some(Self::Clear),
            2 | 3 => Some(Self::Clouds),
            45 | 48 => Some(Self::Fog),
            51 | 53 | 55 | 56 | 57 => Some(Self::Drizzle),
            61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => Some(Self::Rain),
            71 | 73 | 75 | 77 | 85 | 86 => Some(Self::Snow),
            95 | 96 | 99 => Some(Self::Thunderstorm),
            _ => None,
        }
    }

    /// Look up a category by its name, ignoring case
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Thunderstorm => "Thunderstorm",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Mist => "Mist",
            Self::Smoke => "Smoke",
            Self::Haze => "Haze",
            Self::Fog => "Fog",
        }
    }
}

/// Human-readable text for a WMO weather code
pub fn describe_wmo_code(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => "Unknown",
    }
}

/// A place returned by the geocoding step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    pub country: String,
    pub region: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationCandidate {
    /// Display label, e.g. "London, United Kingdom, England"
    pub fn label(&self) -> String {
        let mut label = self.name.clone();
        for part in [Some(self.country.as_str()), self.region.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
        {
            label.push_str(", ");
            label.push_str(part);
        }
        label
    }
}

/// Current conditions for one location at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_celsius: f64,
    pub relative_humidity_percent: u8,
    pub wind_speed_meters_per_second: f64,
    pub condition_code: i32,
    pub is_day: bool,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn display_condition(&self) -> DisplayCondition {
        DisplayCondition {
            condition_code: self.condition_code,
            is_daytime: self.is_day,
        }
    }

    pub fn description(&self) -> &'static str {
        describe_wmo_code(self.condition_code)
    }

    /// Coarse comfort label for the humidity reading
    pub fn humidity_label(&self) -> &'static str {
        match self.relative_humidity_percent {
            0..=29 => "Dry",
            30..=60 => "Comfortable",
            _ => "Humid",
        }
    }

    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed_meters_per_second)
    }
}

/// The part of a snapshot that drives background selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCondition {
    pub condition_code: i32,
    pub is_daytime: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(humidity: u8) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_celsius: 18.2,
            relative_humidity_percent: humidity,
            wind_speed_meters_per_second: 3.44,
            condition_code: 61,
            is_day: false,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_wmo_code_clear() {
        assert_eq!(WeatherCategory::from_wmo_code(0), Some(WeatherCategory::Clear));
        assert_eq!(WeatherCategory::from_wmo_code(1), Some(WeatherCategory::Clear));
    }

    #[test]
    fn test_wmo_code_clouds() {
        assert_eq!(WeatherCategory::from_wmo_code(2), Some(WeatherCategory::Clouds));
        assert_eq!(WeatherCategory::from_wmo_code(3), Some(WeatherCategory::Clouds));
    }

    #[test]
    fn test_wmo_code_fog() {
        assert_eq!(WeatherCategory::from_wmo_code(45), Some(WeatherCategory::Fog));
        assert_eq!(WeatherCategory::from_wmo_code(48), Some(WeatherCategory::Fog));
    }

    #[test]
    fn test_wmo_code_drizzle_includes_freezing() {
        for code in [51, 53, 55, 56, 57] {
            assert_eq!(WeatherCategory::from_wmo_code(code), Some(WeatherCategory::Drizzle));
        }
    }

    #[test]
    fn test_wmo_code_rain_includes_showers() {
        for code in [61, 63, 65, 66, 67, 80, 81, 82] {
            assert_eq!(WeatherCategory::from_wmo_code(code), Some(WeatherCategory::Rain));
        }
    }

    #[test]
    fn test_wmo_code_snow() {
        for code in [71, 73, 75, 77, 85, 86] {
            assert_eq!(WeatherCategory::from_wmo_code(code), Some(WeatherCategory::Snow));
        }
    }

    #[test]
    fn test_wmo_code_thunderstorm() {
        for code in [95, 96, 99] {
            assert_eq!(
                WeatherCategory::from_wmo_code(code),
                Some(WeatherCategory::Thunderstorm)
            );
        }
    }

    #[test]
    fn test_wmo_code_unknown_has_no_category() {
        assert_eq!(WeatherCategory::from_wmo_code(4), None);
        assert_eq!(WeatherCategory::from_wmo_code(999), None);
        assert_eq!(WeatherCategory::from_wmo_code(-1), None);
    }

    #[test]
    fn test_category_from_name() {
        assert_eq!(WeatherCategory::from_name("rain"), Some(WeatherCategory::Rain));
        assert_eq!(WeatherCategory::from_name(" Smoke "), Some(WeatherCategory::Smoke));
        assert_eq!(WeatherCategory::from_name("Tornado"), None);
        for category in WeatherCategory::ALL {
            assert_eq!(WeatherCategory::from_name(category.name()), Some(category));
        }
    }

    #[test]
    fn test_celsius_fahrenheit_round_trip() {
        for celsius in [-40.0, -12.5, 0.0, 18.2, 36.6, 100.0] {
            let f = TemperatureUnit::Fahrenheit.from_celsius(celsius);
            let back = TemperatureUnit::Fahrenheit.to_celsius(f);
            assert!((back - celsius).abs() < 1e-9, "{celsius} -> {f} -> {back}");
        }
        assert!((TemperatureUnit::Fahrenheit.from_celsius(-40.0) + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_format_temperature() {
        assert_eq!(format_temperature(18.2, TemperatureUnit::Celsius), "18.2°C");
        assert_eq!(format_temperature(18.2, TemperatureUnit::Fahrenheit), "64.8°F");
        assert_eq!(format_temperature(0.0, TemperatureUnit::Fahrenheit), "32.0°F");
    }

    #[test]
    fn test_unit_toggle() {
        assert_eq!(TemperatureUnit::Celsius.toggle(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::Fahrenheit.toggle(), TemperatureUnit::Celsius);
    }

    #[test]
    fn test_unit_serde_lowercase() {
        let json = serde_json::to_string(&TemperatureUnit::Fahrenheit).unwrap();
        assert_eq!(json, "\"fahrenheit\"");
    }

    #[test]
    fn test_candidate_label() {
        let mut candidate = LocationCandidate {
            name: "London".into(),
            country: "United Kingdom".into(),
            region: Some("England".into()),
            latitude: 51.5,
            longitude: -0.12,
        };
        assert_eq!(candidate.label(), "London, United Kingdom, England");

        candidate.region = None;
        assert_eq!(candidate.label(), "London, United Kingdom");

        candidate.country = String::new();
        assert_eq!(candidate.label(), "London");
    }

    #[test]
    fn test_snapshot_display_condition() {
        let snap = snapshot(50);
        assert_eq!(
            snap.display_condition(),
            DisplayCondition {
                condition_code: 61,
                is_daytime: false
            }
        );
        assert_eq!(snap.description(), "Slight rain");
        assert_eq!(snap.format_wind(), "3.4 m/s");
    }

    #[test]
    fn test_humidity_label() {
        assert_eq!(snapshot(10).humidity_label(), "Dry");
        assert_eq!(snapshot(45).humidity_label(), "Comfortable");
        assert_eq!(snapshot(85).humidity_label(), "Humid");
    }
}
