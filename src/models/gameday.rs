use super::impact::PlayImpacts;
use super::stadium::Stadium;
use super::weather::WeatherSample;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertKind {
    ExtremeHeat,
    Freezing,
    HighWind,
    HeavyRain,
    Snow,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::ExtremeHeat => "Extreme heat conditions",
            AlertKind::Freezing => "Freezing conditions",
            AlertKind::HighWind => "High wind conditions",
            AlertKind::HeavyRain => "Heavy rain expected",
            AlertKind::Snow => "Snow conditions",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlert {
    pub kind: AlertKind,
    pub message: String,
}

/// Game-day weather for one stadium. A failed lookup is reported in `error`
/// instead of failing the whole batch.
#[derive(Debug, Clone, Serialize)]
pub struct StadiumWeather {
    pub stadium: Stadium,
    pub game_time: DateTime<Utc>,
    pub sample: Option<WeatherSample>,
    pub impacts: Option<PlayImpacts>,
    pub alerts: Vec<WeatherAlert>,
    pub forecast_gap_minutes: Option<i64>,
    pub from_cache: bool,
    pub error: Option<String>,
}

impl StadiumWeather {
    pub fn failed(stadium: Stadium, game_time: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            stadium,
            game_time,
            sample: None,
            impacts: None,
            alerts: Vec::new(),
            forecast_gap_minutes: None,
            from_cache: false,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.impacts.is_some()
    }
}
