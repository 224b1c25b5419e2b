use crate::error::{GamedayError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MM_PER_INCH: f64 = 25.4;

/// Convert a precipitation accumulation (mm over `bucket_hours`) to an hourly rate in inches
pub fn mm_bucket_to_in_per_hr(mm: f64, bucket_hours: f64) -> f64 {
    if bucket_hours <= 0.0 {
        return 0.0;
    }
    mm / MM_PER_INCH / bucket_hours
}

/// One forecast data point, normalized to imperial units.
///
/// Only `temperature_f`, `wind_speed_mph` and `precipitation_in_per_hr` feed the
/// impact rules. The remaining fields are descriptive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub timestamp: DateTime<Utc>,
    pub temperature_f: f64,
    pub wind_speed_mph: f64,
    pub precipitation_in_per_hr: f64, // rain + snow
    #[serde(default)]
    pub snow_in_per_hr: f64,
    #[serde(default)]
    pub wind_gust_mph: Option<f64>,
    #[serde(default)]
    pub humidity_percent: Option<f64>,
    #[serde(default)]
    pub condition: WeatherCondition,
}

impl WeatherSample {
    pub fn new(
        timestamp: DateTime<Utc>,
        temperature_f: f64,
        wind_speed_mph: f64,
        precipitation_in_per_hr: f64,
    ) -> Result<Self> {
        let sample = Self {
            timestamp,
            temperature_f,
            wind_speed_mph,
            precipitation_in_per_hr,
            snow_in_per_hr: 0.0,
            wind_gust_mph: None,
            humidity_percent: None,
            condition: WeatherCondition::default(),
        };
        sample.validate()?;
        Ok(sample)
    }

    pub fn with_snow(mut self, snow_in_per_hr: f64) -> Self {
        self.snow_in_per_hr = snow_in_per_hr;
        self
    }

    pub fn with_gust(mut self, gust_mph: Option<f64>) -> Self {
        self.wind_gust_mph = gust_mph;
        self
    }

    pub fn with_humidity(mut self, humidity_percent: Option<f64>) -> Self {
        self.humidity_percent = humidity_percent;
        self
    }

    pub fn with_condition(mut self, condition: WeatherCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Check the measurements the impact rules depend on
    pub fn validate(&self) -> Result<()> {
        if !self.temperature_f.is_finite() {
            return Err(GamedayError::InvalidInput(format!(
                "temperature is not a number: {}",
                self.temperature_f
            )));
        }
        if !self.wind_speed_mph.is_finite() || self.wind_speed_mph < 0.0 {
            return Err(GamedayError::InvalidInput(format!(
                "wind speed must be a non-negative number, got {}",
                self.wind_speed_mph
            )));
        }
        if !self.precipitation_in_per_hr.is_finite() || self.precipitation_in_per_hr < 0.0 {
            return Err(GamedayError::InvalidInput(format!(
                "precipitation rate must be a non-negative number, got {}",
                self.precipitation_in_per_hr
            )));
        }
        Ok(())
    }

    pub fn rain_in_per_hr(&self) -> f64 {
        (self.precipitation_in_per_hr - self.snow_in_per_hr).max(0.0)
    }
}

/// Weather condition categories from OpenWeatherMap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Other,
}

impl WeatherCondition {
    pub fn from_owm_id(id: u32) -> Self {
        match id {
            200..=232 => WeatherCondition::Thunderstorm,
            300..=321 => WeatherCondition::Drizzle,
            500..=531 => WeatherCondition::Rain,
            600..=622 => WeatherCondition::Snow,
            701 => WeatherCondition::Mist,
            741 => WeatherCondition::Fog,
            800 => WeatherCondition::Clear,
            801..=804 => WeatherCondition::Clouds,
            _ => WeatherCondition::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Cloudy",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Mist => "Mist",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Other => "Other",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 24, 18, 0, 0).unwrap()
    }

    #[test]
    fn new_rejects_negative_wind() {
        let err = WeatherSample::new(kickoff(), 50.0, -1.0, 0.0).unwrap_err();
        assert!(matches!(err, GamedayError::InvalidInput(_)));
    }

    #[test]
    fn new_rejects_nan_temperature() {
        assert!(WeatherSample::new(kickoff(), f64::NAN, 5.0, 0.0).is_err());
    }

    #[test]
    fn new_rejects_negative_precipitation() {
        assert!(WeatherSample::new(kickoff(), 50.0, 5.0, -0.1).is_err());
    }

    #[test]
    fn bucket_conversion() {
        // 25.4 mm over 3 hours is one inch per 3 hours
        let rate = mm_bucket_to_in_per_hr(25.4, 3.0);
        assert!((rate - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(mm_bucket_to_in_per_hr(10.0, 0.0), 0.0);
    }

    #[test]
    fn rain_excludes_snow() {
        let sample = WeatherSample::new(kickoff(), 30.0, 5.0, 0.3)
            .unwrap()
            .with_snow(0.1);
        assert!((sample.rain_in_per_hr() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn weather_condition_from_owm_id() {
        assert_eq!(
            WeatherCondition::from_owm_id(200),
            WeatherCondition::Thunderstorm
        );
        assert_eq!(WeatherCondition::from_owm_id(500), WeatherCondition::Rain);
        assert_eq!(WeatherCondition::from_owm_id(800), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_owm_id(801), WeatherCondition::Clouds);
        assert_eq!(WeatherCondition::from_owm_id(600), WeatherCondition::Snow);
    }
}
