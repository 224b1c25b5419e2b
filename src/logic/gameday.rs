use super::alerts::weather_alerts;
use super::forecast_selector::{gap_minutes, select_closest};
use super::impact::ImpactAdvisor;
use crate::config::{AlertThresholds, Config};
use crate::datasources::{ForecastSource, RetryPolicy};
use crate::db::{CachedForecast, Database};
use crate::error::Result;
use crate::models::{Stadium, StadiumWeather, WeatherSample};
use chrono::{DateTime, Duration, Utc};
use futures_util::future::join_all;

/// The forecast endpoint covers five days, so older cache entries can never
/// contain a relevant sample.
const MAX_STALE_AGE_DAYS: i64 = 5;

struct LoadedForecast {
    samples: Vec<WeatherSample>,
    from_cache: bool,
    fetch_error: Option<String>,
}

/// Stadium weather pipeline: cache, fetch with retry, select, evaluate, alert
pub struct GamedayService<S> {
    source: S,
    db: Option<Database>,
    retry: RetryPolicy,
    cache_ttl: Duration,
    alert_thresholds: AlertThresholds,
    advisor: ImpactAdvisor,
}

impl<S: ForecastSource> GamedayService<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            db: None,
            retry: config.fetch.retry_policy(),
            cache_ttl: config.fetch.cache_ttl(),
            alert_thresholds: config.alerts.clone(),
            advisor: ImpactAdvisor::new(),
        }
    }

    pub fn with_cache(mut self, db: Database) -> Self {
        self.db = Some(db);
        self
    }

    #[cfg(test)]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Look up every game concurrently. Results keep the input order and a
    /// failure only affects its own entry.
    pub async fn weather_for_games(&self, games: &[(Stadium, DateTime<Utc>)]) -> Vec<StadiumWeather> {
        tracing::info!("Fetching game-day weather for {} stadiums", games.len());
        let results = join_all(
            games
                .iter()
                .map(|(stadium, game_time)| self.weather_for_stadium(stadium, *game_time)),
        )
        .await;

        let failed = results.iter().filter(|r| r.error.is_some()).count();
        if failed > 0 {
            tracing::warn!("{} of {} stadium lookups reported errors", failed, results.len());
        }
        results
    }

    pub async fn weather_for_stadium(
        &self,
        stadium: &Stadium,
        game_time: DateTime<Utc>,
    ) -> StadiumWeather {
        let loaded = match self.load_forecast(stadium).await {
            Ok(loaded) => loaded,
            Err(e) => return StadiumWeather::failed(stadium.clone(), game_time, e.to_string()),
        };

        let sample = match select_closest(&loaded.samples, game_time) {
            Ok(sample) => sample.clone(),
            Err(e) => return StadiumWeather::failed(stadium.clone(), game_time, e.to_string()),
        };

        let impacts = match self.advisor.evaluate(&sample) {
            Ok(impacts) => impacts,
            Err(e) => return StadiumWeather::failed(stadium.clone(), game_time, e.to_string()),
        };

        let gap = gap_minutes(&sample, game_time);
        if gap > 180 {
            tracing::debug!(
                "{}: closest forecast is {} minutes from kickoff",
                stadium.name,
                gap
            );
        }

        StadiumWeather {
            stadium: stadium.clone(),
            game_time,
            alerts: weather_alerts(&sample, &self.alert_thresholds),
            sample: Some(sample),
            impacts: Some(impacts),
            forecast_gap_minutes: Some(gap),
            from_cache: loaded.from_cache,
            error: loaded.fetch_error,
        }
    }

    /// Remove cache entries too old to be useful even as a fallback
    pub fn prune_cache(&self) -> Result<usize> {
        match self.db {
            Some(ref db) => {
                db.purge_forecasts_before(Utc::now() - Duration::days(MAX_STALE_AGE_DAYS))
            }
            None => Ok(0),
        }
    }

    async fn load_forecast(&self, stadium: &Stadium) -> Result<LoadedForecast> {
        let now = Utc::now();
        let cached = self.read_cache(stadium);

        if let Some(ref entry) = cached {
            if entry.is_fresh(self.cache_ttl, now) {
                tracing::debug!("{}: using cached forecast", stadium.name);
                return Ok(LoadedForecast {
                    samples: entry.samples.clone(),
                    from_cache: true,
                    fetch_error: None,
                });
            }
        }

        let label = format!("Forecast for {}", stadium.name);
        let fetched = self
            .retry
            .run(&label, || {
                self.source
                    .fetch_forecast(stadium.latitude, stadium.longitude)
            })
            .await;

        match fetched {
            Ok(samples) => {
                if !samples.is_empty() {
                    if let Some(ref db) = self.db {
                        if let Err(e) =
                            db.cache_forecast(stadium.latitude, stadium.longitude, &samples, now)
                        {
                            tracing::warn!("{}: failed to cache forecast: {}", stadium.name, e);
                        }
                    }
                }
                Ok(LoadedForecast {
                    samples,
                    from_cache: false,
                    fetch_error: None,
                })
            }
            Err(e) => match cached {
                Some(entry) if entry.age(now) < Duration::days(MAX_STALE_AGE_DAYS) => {
                    tracing::warn!(
                        "{}: fetch failed, falling back to forecast cached at {}",
                        stadium.name,
                        entry.fetched_at
                    );
                    Ok(LoadedForecast {
                        samples: entry.samples,
                        from_cache: true,
                        fetch_error: Some(format!(
                            "{} (showing cached forecast from {})",
                            e,
                            entry.fetched_at.format("%Y-%m-%d %H:%M UTC")
                        )),
                    })
                }
                _ => Err(e),
            },
        }
    }

    fn read_cache(&self, stadium: &Stadium) -> Option<CachedForecast> {
        let db = self.db.as_ref()?;
        match db.cached_forecast(stadium.latitude, stadium.longitude) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("{}: cache lookup failed: {}", stadium.name, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GamedayError;
    use crate::models::{League, Rating};
    use chrono::TimeZone;
    use std::cell::Cell;
    use std::time::Duration as StdDuration;

    const FLAKY_LAT: f64 = 42.7738;
    const DEAD_LAT: f64 = 41.8623;
    const EMPTY_LAT: f64 = 39.7439;

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 12, 18, 0, 0).unwrap()
    }

    /// Serves a fixed forecast; some latitudes fail always or once
    struct FakeSource {
        calls: Cell<u32>,
        flaky_failures_left: Cell<u32>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                calls: Cell::new(0),
                flaky_failures_left: Cell::new(1),
            }
        }
    }

    impl ForecastSource for FakeSource {
        async fn fetch_forecast(&self, latitude: f64, _longitude: f64) -> Result<Vec<WeatherSample>> {
            self.calls.set(self.calls.get() + 1);

            if latitude == DEAD_LAT {
                return Err(GamedayError::DataSourceUnavailable("503".into()));
            }
            if latitude == FLAKY_LAT && self.flaky_failures_left.get() > 0 {
                self.flaky_failures_left
                    .set(self.flaky_failures_left.get() - 1);
                return Err(GamedayError::DataSourceUnavailable("timeout".into()));
            }
            if latitude == EMPTY_LAT {
                return Ok(Vec::new());
            }

            Ok(vec![
                WeatherSample::new(kickoff() - chrono::Duration::hours(3), 30.0, 18.0, 0.0)
                    .unwrap(),
                WeatherSample::new(kickoff() + chrono::Duration::minutes(30), 28.0, 22.0, 0.6)
                    .unwrap(),
            ])
        }
    }

    fn stadium(name: &str, latitude: f64) -> Stadium {
        Stadium {
            name: name.into(),
            teams: vec![format!("{} Team", name)],
            league: League::Nfl,
            latitude,
            longitude: -80.0,
            location: String::new(),
            default_kickoff_utc: League::Nfl.default_kickoff_utc(),
        }
    }

    fn service() -> GamedayService<FakeSource> {
        GamedayService::new(FakeSource::new(), &Config::default())
            .with_retry(RetryPolicy::new(3, StdDuration::ZERO))
    }

    #[tokio::test]
    async fn selects_closest_sample_and_evaluates() {
        let svc = service();
        let result = svc
            .weather_for_stadium(&stadium("Heinz", 40.4468), kickoff())
            .await;

        assert!(result.is_ok(), "{:?}", result.error);
        let sample = result.sample.unwrap();
        assert_eq!(sample.temperature_f, 28.0);
        assert_eq!(result.forecast_gap_minutes, Some(30));
        let impacts = result.impacts.unwrap();
        assert_eq!(impacts.passing.total_score(), -8);
        assert_eq!(impacts.passing.rating(), Rating::Difficult);
        assert!(!result.alerts.is_empty());
        assert!(!result.from_cache);
    }

    #[tokio::test]
    async fn one_failure_does_not_block_the_others() {
        let svc = service();
        let games = vec![
            (stadium("Arrowhead", 39.0489), kickoff()),
            (stadium("Soldier", DEAD_LAT), kickoff()),
            (stadium("Highmark", FLAKY_LAT), kickoff()),
        ];

        let results = svc.weather_for_games(&games).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].stadium.name, "Arrowhead");
        assert!(results[0].is_ok());

        let dead = &results[1];
        assert_eq!(dead.stadium.name, "Soldier");
        assert!(dead.impacts.is_none());
        let error = dead.error.as_deref().unwrap();
        assert!(error.contains("Failed after 4 attempts"), "{}", error);

        // Recovered on the second attempt
        assert!(results[2].is_ok());

        // 1 + 4 + 2 attempts
        assert_eq!(svc.source.calls.get(), 7);
    }

    #[tokio::test]
    async fn empty_forecast_is_reported() {
        let svc = service();
        let result = svc
            .weather_for_stadium(&stadium("Mile High", EMPTY_LAT), kickoff())
            .await;
        assert!(result.error.unwrap().contains("Invalid input"));
    }

    #[tokio::test]
    async fn fresh_cache_skips_fetch() {
        let db = Database::open_in_memory().unwrap();
        let cached = vec![WeatherSample::new(kickoff(), 70.0, 3.0, 0.0).unwrap()];
        db.cache_forecast(40.4468, -80.0, &cached, Utc::now()).unwrap();

        let svc = service().with_cache(db);
        let result = svc
            .weather_for_stadium(&stadium("Heinz", 40.4468), kickoff())
            .await;

        assert_eq!(svc.source.calls.get(), 0);
        assert!(result.from_cache);
        assert!(result.is_ok());
        assert_eq!(result.sample.unwrap().temperature_f, 70.0);
    }

    #[tokio::test]
    async fn fetched_forecast_is_cached() {
        let db = Database::open_in_memory().unwrap();
        let svc = service().with_cache(db.clone());

        svc.weather_for_stadium(&stadium("Heinz", 40.4468), kickoff())
            .await;
        svc.weather_for_stadium(&stadium("Heinz", 40.4468), kickoff())
            .await;

        assert_eq!(svc.source.calls.get(), 1);
        assert_eq!(
            db.cached_forecast(40.4468, -80.0).unwrap().unwrap().samples.len(),
            2
        );
    }

    #[tokio::test]
    async fn stale_cache_is_used_when_fetch_fails() {
        let db = Database::open_in_memory().unwrap();
        let cached = vec![WeatherSample::new(kickoff(), 45.0, 4.0, 0.0).unwrap()];
        db.cache_forecast(DEAD_LAT, -80.0, &cached, Utc::now() - chrono::Duration::hours(2))
            .unwrap();

        let svc = service().with_cache(db);
        let result = svc
            .weather_for_stadium(&stadium("Soldier", DEAD_LAT), kickoff())
            .await;

        assert!(result.from_cache);
        assert!(result.impacts.is_some());
        assert!(result
            .error
            .unwrap()
            .contains("showing cached forecast"));
    }

    #[tokio::test]
    async fn prune_without_cache_is_noop() {
        assert_eq!(service().prune_cache().unwrap(), 0);
    }
}
