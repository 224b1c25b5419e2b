use super::ForecastSource;
use crate::config::OpenWeatherMapConfig;
use crate::error::{GamedayError, Result};
use crate::models::{mm_bucket_to_in_per_hr, WeatherCondition, WeatherSample};
use chrono::DateTime;
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
    base_url: String,
}

// OpenWeatherMap API response structures. Numeric fields the impact rules
// need are optional here so a single malformed entry can be rejected on its own.
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    #[serde(default)]
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: Option<i64>,
    main: Option<OwmMain>,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    wind: Option<OwmWind>,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
    #[serde(default)]
    snow: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    #[serde(default)]
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    id: u32,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: Option<f64>,
    #[serde(default)]
    gust: Option<f64>,
}

// Accumulation in mm over the last 1h or 3h
#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "1h", default)]
    one_hour: Option<f64>,
    #[serde(rename = "3h", default)]
    three_hour: Option<f64>,
}

impl OwmPrecipitation {
    fn rate_in_per_hr(&self) -> f64 {
        match (self.one_hour, self.three_hour) {
            (Some(mm), _) => mm_bucket_to_in_per_hr(mm, 1.0),
            (None, Some(mm)) => mm_bucket_to_in_per_hr(mm, 3.0),
            (None, None) => 0.0,
        }
    }
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self::with_base_url(config, API_BASE_URL)
    }

    pub fn with_base_url(config: OpenWeatherMapConfig, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the 5-day/3-hour forecast for a coordinate
    pub async fn fetch_samples(&self, latitude: f64, longitude: f64) -> Result<Vec<WeatherSample>> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=imperial",
            self.base_url, latitude, longitude, self.config.api_key
        );
        tracing::debug!(
            "Fetching forecast for ({}, {})",
            latitude,
            longitude
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                GamedayError::DataSourceUnavailable(format!(
                    "OpenWeatherMap: {}",
                    self.redact(&e.to_string())
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &self.redact(&body)));
        }

        let body = response.text().await.map_err(|e| {
            GamedayError::DataSourceUnavailable(format!(
                "Failed to read OpenWeatherMap response: {}",
                self.redact(&e.to_string())
            ))
        })?;

        parse_forecast(&body)
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, latitude: f64, longitude: f64) -> Result<bool> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=imperial",
            self.base_url, latitude, longitude, self.config.api_key
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                GamedayError::DataSourceUnavailable(format!(
                    "OpenWeatherMap: {}",
                    self.redact(&e.to_string())
                ))
            })?;

        Ok(response.status().is_success())
    }

    // reqwest errors include the request URL, which carries the key
    fn redact(&self, text: &str) -> String {
        if self.config.api_key.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.config.api_key, "API_KEY")
        }
    }
}

impl ForecastSource for OpenWeatherMapClient {
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Vec<WeatherSample>> {
        self.fetch_samples(latitude, longitude).await
    }
}

// Client errors other than rate limiting will fail the same way on every attempt
fn status_error(status: reqwest::StatusCode, body: &str) -> GamedayError {
    let message = format!("OpenWeatherMap returned {}: {}", status, body);
    if status.is_client_error() && status != reqwest::StatusCode::TOO_MANY_REQUESTS {
        GamedayError::Rejected(message)
    } else {
        GamedayError::DataSourceUnavailable(message)
    }
}

/// Parse a forecast body, skipping entries that are missing required fields
fn parse_forecast(body: &str) -> Result<Vec<WeatherSample>> {
    let response: OwmForecastResponse = serde_json::from_str(body).map_err(|e| {
        GamedayError::DataSourceUnavailable(format!(
            "Failed to parse OpenWeatherMap response: {}",
            e
        ))
    })?;

    let total = response.list.len();
    let samples: Vec<WeatherSample> = response
        .list
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match convert_forecast_item(item) {
            Ok(sample) => Some(sample),
            Err(e) => {
                tracing::warn!("Skipping forecast entry {}: {}", i, e);
                None
            }
        })
        .collect();

    tracing::debug!("Parsed {}/{} forecast entries", samples.len(), total);
    Ok(samples)
}

fn convert_forecast_item(item: OwmForecastItem) -> Result<WeatherSample> {
    let dt = item
        .dt
        .ok_or_else(|| GamedayError::InvalidInput("missing timestamp".into()))?;
    let timestamp = DateTime::from_timestamp(dt, 0)
        .ok_or_else(|| GamedayError::InvalidInput(format!("timestamp out of range: {}", dt)))?;

    let main = item
        .main
        .ok_or_else(|| GamedayError::InvalidInput("missing main block".into()))?;
    let temp_f = main
        .temp
        .ok_or_else(|| GamedayError::InvalidInput("missing temperature".into()))?;

    let wind = item
        .wind
        .ok_or_else(|| GamedayError::InvalidInput("missing wind block".into()))?;
    let wind_speed_mph = wind
        .speed
        .ok_or_else(|| GamedayError::InvalidInput("missing wind speed".into()))?;

    // Combine rain and snow precipitation
    let rain = item.rain.as_ref().map(|r| r.rate_in_per_hr()).unwrap_or(0.0);
    let snow = item.snow.as_ref().map(|s| s.rate_in_per_hr()).unwrap_or(0.0);

    let condition = item
        .weather
        .first()
        .map(|w| WeatherCondition::from_owm_id(w.id))
        .unwrap_or_default();

    Ok(
        WeatherSample::new(timestamp, temp_f, wind_speed_mph, rain + snow)?
            .with_snow(snow)
            .with_gust(wind.gust)
            .with_humidity(main.humidity)
            .with_condition(condition),
    )
}
