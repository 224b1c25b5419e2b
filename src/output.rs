use crate::error::Result;
use crate::logic::impact::{PlayRules, Trigger};
use crate::logic::stadium_validation::ValidationReport;
use crate::models::{PlayImpacts, Stadium, StadiumWeather, WeatherSample};
use serde::Serialize;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn stadium_list(stadiums: &[&Stadium]) -> String {
    if stadiums.is_empty() {
        return "No stadiums found\n".to_string();
    }

    let mut out = String::new();
    for stadium in stadiums {
        out.push_str(&format!(
            "{:<5} {:<40} {:<30} {}\n",
            stadium.league.as_str(),
            stadium.name,
            stadium.location,
            stadium.team_label()
        ));
    }
    out.push_str(&format!("\n{} stadiums\n", stadiums.len()));
    out
}

pub fn conditions(sample: &WeatherSample) -> String {
    let mut line = format!(
        "{:.0}°F, wind {:.0} mph",
        sample.temperature_f, sample.wind_speed_mph
    );
    if let Some(gust) = sample.wind_gust_mph {
        line.push_str(&format!(" (gusts {:.0})", gust));
    }
    line.push_str(&format!(
        ", precip {:.2} in/hr, {}",
        sample.precipitation_in_per_hr, sample.condition
    ));
    if let Some(humidity) = sample.humidity_percent {
        line.push_str(&format!(", humidity {:.0}%", humidity));
    }
    line
}

pub fn impacts(play: &PlayImpacts) -> String {
    let mut out = String::new();
    for report in play.reports() {
        out.push_str(&format!(
            "{}: {} ({}) - {}\n",
            report.play_type().title(),
            report.rating(),
            report.total_score(),
            report.recommendation().message
        ));
        for finding in report.findings() {
            out.push_str(&format!(
                "  {} {} ({})\n",
                finding.severity.symbol(),
                finding.description,
                finding.score_delta
            ));
        }
    }
    out
}

pub fn rule_tables(tables: &[&PlayRules]) -> String {
    let mut out = String::new();
    for rules in tables {
        out.push_str(&format!("{}\n", rules.play_type.title()));
        for rule in rules.factors {
            for tier in rule.tiers {
                let trigger = match tier.trigger {
                    Trigger::AtLeast(v) => format!(">= {}", v),
                    Trigger::AtMost(v) => format!("<= {}", v),
                };
                out.push_str(&format!(
                    "  {:<14} {:<8} {:<7} {:>3}  {}\n",
                    rule.factor.as_str(),
                    trigger,
                    tier.severity.as_str(),
                    tier.score_delta,
                    tier.description
                ));
            }
        }
    }
    out
}

pub fn stadium_weather(result: &StadiumWeather) -> String {
    let stadium = &result.stadium;
    let mut out = format!(
        "{} ({}) - {}\nKickoff: {}\n",
        stadium.name,
        stadium.team_label(),
        stadium.location,
        result.game_time.format("%Y-%m-%d %H:%M UTC")
    );

    if let Some(ref error) = result.error {
        out.push_str(&format!("Error: {}\n", error));
    }

    if let Some(ref sample) = result.sample {
        let mut line = format!("Forecast: {}", conditions(sample));
        if let Some(gap) = result.forecast_gap_minutes {
            line.push_str(&format!(" [{} min from kickoff]", gap));
        }
        if result.from_cache {
            line.push_str(" (cached)");
        }
        out.push_str(&line);
        out.push('\n');
    }

    if !result.alerts.is_empty() {
        out.push_str("Alerts:\n");
        for alert in &result.alerts {
            out.push_str(&format!("  ! {}\n", alert.message));
        }
    }

    if let Some(ref play_impacts) = result.impacts {
        out.push_str(&impacts(play_impacts));
    }

    out
}

pub fn validation(report: &ValidationReport) -> String {
    let mut out = format!(
        "NFL stadiums: {}\nNCAA stadiums: {}\n",
        report.nfl_count, report.ncaa_count
    );
    for warning in &report.warnings {
        out.push_str(&format!("warning: {}\n", warning));
    }
    for error in &report.errors {
        out.push_str(&format!("error: {}\n", error));
    }
    if report.is_valid() {
        out.push_str("Validation passed\n");
    } else {
        out.push_str(&format!(
            "Validation failed with {} errors\n",
            report.errors.len()
        ));
    }
    out
}
