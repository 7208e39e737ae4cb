use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";

#[derive(Debug, Error, PartialEq)]
pub enum CoordinatesError {
    #[error("{axis} must be a finite number")]
    NonFinite { axis: &'static str },

    #[error("{axis} {value} is outside [{min}, {max}]")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        check_axis("latitude", latitude, 90.0)?;
        check_axis("longitude", longitude, 180.0)?;

        Ok(Self { latitude, longitude })
    }
}

fn check_axis(axis: &'static str, value: f64, bound: f64) -> Result<(), CoordinatesError> {
    if !value.is_finite() {
        return Err(CoordinatesError::NonFinite { axis });
    }
    if !(-bound..=bound).contains(&value) {
        return Err(CoordinatesError::OutOfRange {
            axis,
            value,
            min: -bound,
            max: bound,
        });
    }
    Ok(())
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// One decoded OneCall response.
///
/// Every field is required: a body missing any of them fails to decode as a
/// whole, so a snapshot is never partially populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// IANA identifier such as `Europe/Moscow`.
    pub timezone: String,
    pub current: CurrentReading,
    pub hourly: Vec<HourlyReading>,
    pub daily: Vec<DailyReading>,
}

impl WeatherSnapshot {
    /// Place name shown in the header, taken from the timezone identifier
    /// (`America/New_York` -> `New_York`).
    pub fn place_name(&self) -> &str {
        self.timezone
            .split_once('/')
            .map(|(_, rest)| rest)
            .unwrap_or(&self.timezone)
    }

    pub fn today(&self) -> Option<&DailyReading> {
        self.daily.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReading {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temp: f64,
    pub feels_like: f64,
    /// hPa
    pub pressure: u32,
    /// Percent.
    pub humidity: u8,
    pub uvi: f64,
    /// Meters.
    pub visibility: f64,
    pub wind_speed: f64,
    pub weather: Vec<Condition>,
}

impl CurrentReading {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn sunrise_utc(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sunrise)
    }

    pub fn sunset_utc(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sunset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    pub dt: i64,
    pub temp: f64,
    pub humidity: u8,
    pub weather: Vec<Condition>,
}

impl HourlyReading {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn time_utc(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReading {
    pub dt: i64,
    pub temp: DailyTemperature,
    pub humidity: u8,
    pub weather: Vec<Condition>,
}

impl DailyReading {
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn time_utc(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTemperature {
    pub min: f64,
    pub max: f64,
    pub night: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
    /// Icon code such as `10d`.
    pub icon: String,
}

impl Condition {
    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}@2x.png", self.icon)
    }
}

pub fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "lat": 55.75,
            "lon": 37.62,
            "timezone": "Europe/Moscow",
            "timezone_offset": 10800,
            "current": {
                "dt": 1_700_000_000,
                "sunrise": 1_699_990_000,
                "sunset": 1_700_020_000,
                "temp": 3.4,
                "feels_like": -0.2,
                "pressure": 1016,
                "humidity": 81,
                "dew_point": 0.5,
                "uvi": 0.31,
                "clouds": 75,
                "visibility": 10000,
                "wind_speed": 4.0,
                "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }]
            },
            "hourly": [
                { "dt": 1_700_000_000, "temp": 3.4, "humidity": 81, "weather": [{ "description": "broken clouds", "icon": "04d" }] },
                { "dt": 1_700_003_600, "temp": 3.1, "humidity": 83, "weather": [{ "description": "overcast clouds", "icon": "04d" }] }
            ],
            "daily": [
                { "dt": 1_699_995_600, "temp": { "min": 1.0, "max": 4.2, "night": 1.5, "day": 3.9 }, "humidity": 70, "weather": [{ "description": "light rain", "icon": "10d" }] }
            ]
        })
    }

    #[test]
    fn decodes_onecall_body_and_ignores_extra_fields() {
        let snapshot: WeatherSnapshot = serde_json::from_value(sample()).expect("decode");

        assert_eq!(snapshot.timezone, "Europe/Moscow");
        assert_eq!(snapshot.current.pressure, 1016);
        assert_eq!(snapshot.current.visibility, 10000.0);
        assert_eq!(snapshot.hourly.len(), 2);
        assert_eq!(snapshot.daily[0].temp.night, 1.5);
        assert_eq!(snapshot.current.condition().map(|c| c.icon.as_str()), Some("04d"));
    }

    #[test]
    fn missing_nested_field_fails_whole_decode() {
        let mut body = sample();
        body["daily"][0]["temp"]
            .as_object_mut()
            .expect("temp object")
            .remove("night");

        assert!(serde_json::from_value::<WeatherSnapshot>(body).is_err());
    }

    #[test]
    fn place_name_strips_region_prefix() {
        let mut snapshot: WeatherSnapshot = serde_json::from_value(sample()).expect("decode");
        assert_eq!(snapshot.place_name(), "Moscow");

        snapshot.timezone = "America/Argentina/Buenos_Aires".into();
        assert_eq!(snapshot.place_name(), "Argentina/Buenos_Aires");

        snapshot.timezone = "UTC".into();
        assert_eq!(snapshot.place_name(), "UTC");
    }

    #[test]
    fn icon_url_points_at_2x_png() {
        let c = Condition { description: "clear sky".into(), icon: "01n".into() };
        assert_eq!(c.icon_url(), "http://openweathermap.org/img/wn/01n@2x.png");
    }

    #[test]
    fn coordinates_reject_non_finite_and_out_of_range() {
        assert!(Coordinates::new(40.7128, -74.0060).is_ok());
        assert_eq!(
            Coordinates::new(f64::NAN, 0.0),
            Err(CoordinatesError::NonFinite { axis: "latitude" })
        );
        assert!(matches!(
            Coordinates::new(0.0, 181.0),
            Err(CoordinatesError::OutOfRange { axis: "longitude", .. })
        ));
    }

    #[test]
    fn unix_to_utc_converts_epoch_seconds() {
        let dt = unix_to_utc(0).expect("epoch");
        assert_eq!(dt.to_rfc3339(), "1970-01-01T00:00:00+00:00");
    }
}
