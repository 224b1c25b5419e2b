use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "gameday",
    version,
    about = "Game-day stadium weather and play impact analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stadiums in the directory
    Stadiums {
        /// nfl or ncaa
        #[arg(short, long)]
        league: Option<String>,

        /// Match against stadium, team or location
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Game-day forecast and play impacts for one team or a whole league
    Forecast {
        /// Team name, e.g. "Green Bay Packers"
        #[arg(short, long)]
        team: Option<String>,

        /// nfl or ncaa (all stadiums in the league when no team is given)
        #[arg(short, long)]
        league: Option<String>,

        /// Game date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Kickoff time in UTC (HH:MM), defaults to the stadium's usual kickoff.
        /// Times before 12:00 are night games and fall on the next UTC day
        #[arg(long, value_parser = parse_time)]
        time: Option<NaiveTime>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Evaluate play impacts for given conditions without fetching
    Analyze {
        /// Temperature in °F
        #[arg(long, allow_negative_numbers = true)]
        temp: f64,

        /// Sustained wind in mph
        #[arg(long)]
        wind: f64,

        /// Precipitation in inches per hour
        #[arg(long, default_value_t = 0.0)]
        precip: f64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the impact rule tables
    Rules,
    /// Validate a stadium file (defaults to the configured or built-in list)
    Validate {
        path: Option<PathBuf>,
    },
    /// Re-run interactive setup
    Init,
    /// Validate config and test the weather API connection
    Check,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_forecast_args() {
        let cli = Cli::parse_from([
            "gameday",
            "forecast",
            "--team",
            "Chicago Bears",
            "--date",
            "2024-12-22",
            "--time",
            "18:00",
            "-v",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Forecast {
                team, date, time, json, ..
            } => {
                assert_eq!(team.as_deref(), Some("Chicago Bears"));
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 22));
                assert_eq!(time, NaiveTime::from_hms_opt(18, 0, 0));
                assert!(!json);
            }
            _ => panic!("expected forecast"),
        }
    }

    #[test]
    fn analyze_accepts_sub_zero_temperature() {
        let cli = Cli::parse_from(["gameday", "analyze", "--temp", "-5", "--wind", "12"]);
        match cli.command {
            Commands::Analyze { temp, wind, precip, .. } => {
                assert_eq!(temp, -5.0);
                assert_eq!(wind, 12.0);
                assert_eq!(precip, 0.0);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn rejects_bad_date() {
        assert!(Cli::try_parse_from(["gameday", "forecast", "--date", "12/22/2024"]).is_err());
    }
}
