use crate::config::AlertThresholds;
use crate::models::{AlertKind, WeatherAlert, WeatherSample};

/// Threshold alerts for a game-day sample. Thresholds are strict (value must exceed them).
pub fn weather_alerts(sample: &WeatherSample, thresholds: &AlertThresholds) -> Vec<WeatherAlert> {
    let mut alerts = Vec::new();

    if sample.temperature_f > thresholds.high_temp_f {
        alerts.push(alert(
            AlertKind::ExtremeHeat,
            format!("{:.0}°F at kickoff", sample.temperature_f),
        ));
    }
    if sample.temperature_f < thresholds.low_temp_f {
        alerts.push(alert(
            AlertKind::Freezing,
            format!("{:.0}°F at kickoff", sample.temperature_f),
        ));
    }
    if sample.wind_speed_mph > thresholds.wind_speed_mph {
        let gust = sample
            .wind_gust_mph
            .map(|g| format!(", gusts to {:.0} mph", g))
            .unwrap_or_default();
        alerts.push(alert(
            AlertKind::HighWind,
            format!("{:.0} mph sustained{}", sample.wind_speed_mph, gust),
        ));
    }
    if sample.rain_in_per_hr() > thresholds.rain_in_per_hr {
        alerts.push(alert(
            AlertKind::HeavyRain,
            format!("{:.2}\"/hr of rain", sample.rain_in_per_hr()),
        ));
    }
    if sample.snow_in_per_hr > thresholds.snow_in_per_hr {
        alerts.push(alert(
            AlertKind::Snow,
            format!("{:.2}\"/hr of snow", sample.snow_in_per_hr),
        ));
    }

    alerts
}

fn alert(kind: AlertKind, detail: String) -> WeatherAlert {
    WeatherAlert {
        kind,
        message: format!("{}: {}", kind, detail),
    }
}
