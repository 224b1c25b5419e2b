use crate::db::Database;
use crate::error::Result;
use crate::models::WeatherSample;
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Row};
use tracing::warn;

/// Forecast samples for one coordinate as last fetched
#[derive(Debug, Clone)]
pub struct CachedForecast {
    pub samples: Vec<WeatherSample>,
    pub fetched_at: DateTime<Utc>,
}

impl CachedForecast {
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.fetched_at)
    }

    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.age(now) < ttl
    }
}

// Stadium coordinates are fixed, so four decimals (~11 m) identify a location
fn location_key(latitude: f64, longitude: f64) -> String {
    format!("{:.4},{:.4}", latitude, longitude)
}

// Forecast Cache Queries

impl Database {
    pub fn cache_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        samples: &[WeatherSample],
        fetched_at: DateTime<Utc>,
    ) -> Result<()> {
        let payload = serde_json::to_string(samples)?;
        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT OR REPLACE INTO forecast_cache
                    (location_key, latitude, longitude, fetched_at, payload)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    location_key(latitude, longitude),
                    latitude,
                    longitude,
                    fetched_at.to_rfc3339(),
                    payload,
                ],
            )?;
            Ok(())
        })
    }

    /// Last cached forecast for a coordinate, regardless of age
    pub fn cached_forecast(&self, latitude: f64, longitude: f64) -> Result<Option<CachedForecast>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT fetched_at, payload FROM forecast_cache WHERE location_key = ?1",
                    [location_key(latitude, longitude)],
                    row_to_raw_entry,
                )
                .optional()?;

            Ok(row.and_then(|(fetched_at, payload)| decode_entry(&fetched_at, &payload)))
        })
    }

    /// Delete entries fetched before `cutoff`; returns the number removed
    pub fn purge_forecasts_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        self.with_conn(|conn| {
            // RFC 3339 strings in UTC sort chronologically
            let removed = conn.execute(
                "DELETE FROM forecast_cache WHERE fetched_at < ?1",
                [cutoff.to_rfc3339()],
            )?;
            Ok(removed)
        })
    }
}

fn row_to_raw_entry(row: &Row) -> rusqlite::Result<(String, String)> {
    Ok((row.get("fetched_at")?, row.get("payload")?))
}

fn decode_entry(fetched_at: &str, payload: &str) -> Option<CachedForecast> {
    let fetched_at = match DateTime::parse_from_rfc3339(fetched_at) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => {
            warn!(fetched_at = %fetched_at, "Unreadable cache timestamp, ignoring entry: {}", e);
            return None;
        }
    };

    match serde_json::from_str::<Vec<WeatherSample>>(payload) {
        Ok(samples) => Some(CachedForecast {
            samples,
            fetched_at,
        }),
        Err(e) => {
            warn!("Unreadable cached forecast, ignoring entry: {}", e);
            None
        }
    }
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
