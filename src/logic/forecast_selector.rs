use crate::error::{GamedayError, Result};
use crate::models::WeatherSample;
use chrono::{DateTime, Utc};

/// Absolute distance between a sample and the target, in milliseconds
fn distance_ms(sample: &WeatherSample, target: DateTime<Utc>) -> i64 {
    sample
        .timestamp
        .signed_duration_since(target)
        .num_milliseconds()
        .abs()
}

/// Pick the sample closest in time to `target`. Ties go to the earliest entry.
pub fn select_closest(
    samples: &[WeatherSample],
    target: DateTime<Utc>,
) -> Result<&WeatherSample> {
    // min_by_key keeps the first of equal minimums
    samples
        .iter()
        .min_by_key(|sample| distance_ms(sample, target))
        .ok_or_else(|| GamedayError::InvalidInput("forecast sample list is empty".into()))
}

/// Minutes between the selected sample and the target
pub fn gap_minutes(sample: &WeatherSample, target: DateTime<Utc>) -> i64 {
    distance_ms(sample, target) / 60_000
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 24, 18, 0, 0).unwrap()
    }

    fn at(offset_hours: i64, temp_f: f64) -> WeatherSample {
        WeatherSample::new(kickoff() + Duration::hours(offset_hours), temp_f, 5.0, 0.0).unwrap()
    }

    #[test]
    fn empty_list_is_invalid_input() {
        let result = select_closest(&[], kickoff());
        assert!(matches!(result, Err(GamedayError::InvalidInput(_))));
    }

    #[test]
    fn picks_nearest_sample() {
        let samples = vec![at(-9, 40.0), at(-3, 45.0), at(1, 50.0), at(6, 42.0)];
        let chosen = select_closest(&samples, kickoff()).unwrap();
        assert_eq!(chosen.temperature_f, 50.0);
        assert_eq!(gap_minutes(chosen, kickoff()), 60);
    }

    #[test]
    fn tie_goes_to_earlier_index() {
        let samples = vec![at(3, 1.0), at(-3, 2.0), at(3, 3.0)];
        let chosen = select_closest(&samples, kickoff()).unwrap();
        assert_eq!(chosen.temperature_f, 1.0);

        let reversed = vec![at(-3, 2.0), at(3, 1.0)];
        let chosen = select_closest(&reversed, kickoff()).unwrap();
        assert_eq!(chosen.temperature_f, 2.0);
    }

    #[test]
    fn target_outside_forecast_range_uses_edge() {
        let samples = vec![at(0, 1.0), at(3, 2.0), at(6, 3.0)];
        let far_future = kickoff() + Duration::days(10);
        assert_eq!(select_closest(&samples, far_future).unwrap().temperature_f, 3.0);
        let far_past = kickoff() - Duration::days(10);
        assert_eq!(select_closest(&samples, far_past).unwrap().temperature_f, 1.0);
    }

    #[test]
    fn no_sample_is_strictly_closer() {
        let samples: Vec<_> = (-8..8).map(|h| at(h * 3, h as f64)).collect();
        for minutes in (0..600).step_by(37) {
            let target = kickoff() - Duration::hours(12) + Duration::minutes(minutes * 4);
            let chosen = select_closest(&samples, target).unwrap();
            let best = distance_ms(chosen, target);
            assert!(samples.contains(chosen));
            assert!(samples.iter().all(|s| distance_ms(s, target) >= best));
        }
    }
}
