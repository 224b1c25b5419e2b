mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod output;

use chrono::{NaiveDate, NaiveTime, Utc};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::{OpenWeatherMapClient, StadiumDirectory, BUILTIN_STADIUMS};
use db::Database;
use error::{GamedayError, Result};
use logic::alerts::weather_alerts;
use logic::stadium_validation::{validate_directory_json, validate_file};
use logic::{GamedayService, ImpactAdvisor};
use models::{League, Stadium, WeatherSample};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// Lambeau Field, used for the connection check
const CHECK_LATITUDE: f64 = 44.5013;
const CHECK_LONGITUDE: f64 = -88.0622;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init => {
            Config::setup_interactive()?;
            Ok(())
        }
        Commands::Check => run_check(cli.config).await,
        Commands::Stadiums { league, search } => {
            let config = load_config(cli.config);
            run_stadiums(&config, league.as_deref(), search.as_deref())
        }
        Commands::Analyze {
            temp,
            wind,
            precip,
            json,
        } => {
            let config = load_config(cli.config);
            run_analyze(&config, temp, wind, precip, json)
        }
        Commands::Rules => {
            print!("{}", output::rule_tables(&ImpactAdvisor::new().list_rules()));
            Ok(())
        }
        Commands::Validate { path } => {
            let config = load_config(cli.config);
            run_validate(&config, path)
        }
        Commands::Forecast {
            team,
            league,
            date,
            time,
            json,
        } => {
            let config = load_config(cli.config);
            let request = ForecastRequest {
                team,
                league,
                date,
                time,
                json,
            };
            run_forecast(&config, cli.data_dir.as_ref(), request).await
        }
    }
}

fn load_config(config_override: Option<PathBuf>) -> Config {
    match Config::load_or_default(config_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            eprintln!("Fix the config file or run `gameday init` to create a new one");
            std::process::exit(1);
        }
    }
}

fn parse_league(league: Option<&str>) -> Result<Option<League>> {
    match league {
        Some(raw) => League::from_str(raw)
            .map(Some)
            .ok_or_else(|| GamedayError::InvalidInput(format!("Unknown league: {}", raw))),
        None => Ok(None),
    }
}

fn run_stadiums(config: &Config, league: Option<&str>, search: Option<&str>) -> Result<()> {
    let league = parse_league(league)?;
    let directory = StadiumDirectory::load(config.stadiums.path.as_deref())?;

    let stadiums: Vec<&Stadium> = directory
        .search(search.unwrap_or_default())
        .into_iter()
        .filter(|s| league.map_or(true, |l| s.league == l))
        .collect();

    print!("{}", output::stadium_list(&stadiums));
    Ok(())
}

fn run_analyze(config: &Config, temp: f64, wind: f64, precip: f64, json: bool) -> Result<()> {
    let sample = WeatherSample::new(Utc::now(), temp, wind, precip)?;
    let impacts = ImpactAdvisor::new().evaluate(&sample)?;
    let alerts = weather_alerts(&sample, &config.alerts);

    if json {
        let value = serde_json::json!({
            "conditions": sample,
            "alerts": alerts,
            "impacts": impacts,
        });
        println!("{}", output::to_json(&value)?);
        return Ok(());
    }

    println!("Conditions: {}", output::conditions(&sample));
    for alert in &alerts {
        println!("  ! {}", alert.message);
    }
    print!("{}", output::impacts(&impacts));
    Ok(())
}

fn run_validate(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let report = match path.or_else(|| config.stadiums.path.clone()) {
        Some(p) => {
            println!("Validating {}", p.display());
            validate_file(&p)?
        }
        None => {
            println!("Validating built-in stadium list");
            validate_directory_json(BUILTIN_STADIUMS)?
        }
    };

    print!("{}", output::validation(&report));
    if !report.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

struct ForecastRequest {
    team: Option<String>,
    league: Option<String>,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
    json: bool,
}

async fn run_forecast(
    config: &Config,
    data_dir: Option<&PathBuf>,
    request: ForecastRequest,
) -> Result<()> {
    let api = config.weather_api().ok_or_else(|| {
        GamedayError::Config(
            "OpenWeatherMap API key not configured. Run `gameday init` or set OPENWEATHER_API_KEY"
                .into(),
        )
    })?;

    let league = parse_league(request.league.as_deref())?;
    let directory = StadiumDirectory::load(config.stadiums.path.as_deref())?;

    let stadiums: Vec<&Stadium> = match request.team {
        Some(ref team) => match directory.find_team(team) {
            Ok(stadium) => vec![stadium],
            Err(e) => {
                let known = directory.team_names(league.unwrap_or(League::Nfl));
                eprintln!("Known teams: {}", known.join(", "));
                return Err(e);
            }
        },
        None => match league {
            Some(l) => directory.by_league(l),
            None => directory.all().iter().collect(),
        },
    };

    let date = request.date.unwrap_or_else(|| Utc::now().date_naive());
    let games: Vec<_> = stadiums
        .into_iter()
        .map(|s| (s.clone(), s.game_time(date, request.time)))
        .collect();

    let mut service = GamedayService::new(OpenWeatherMapClient::new(api.clone()), config);
    match Database::open(data_dir) {
        Ok(db) => service = service.with_cache(db),
        Err(e) => tracing::warn!("Forecast cache unavailable, fetching without it: {}", e),
    }
    if let Err(e) = service.prune_cache() {
        tracing::warn!("Failed to prune forecast cache: {}", e);
    }

    let results = service.weather_for_games(&games).await;

    if request.json {
        println!("{}", output::to_json(&results)?);
    } else {
        let blocks: Vec<String> = results.iter().map(output::stadium_weather).collect();
        print!("{}", blocks.join("\n"));
        if results.len() > 1 {
            let ok = results.iter().filter(|r| r.is_ok()).count();
            println!("\n{} of {} stadiums updated without errors", ok, results.len());
        }
    }

    if !results.is_empty() && results.iter().all(|r| r.impacts.is_none()) {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_check(config_override: Option<PathBuf>) -> Result<()> {
    let config = match Config::load(config_override) {
        Ok(c) => {
            println!("Config: OK");
            c
        }
        Err(e) => {
            eprintln!("Config: FAILED - {}", e);
            std::process::exit(1);
        }
    };

    match StadiumDirectory::load(config.stadiums.path.as_deref()) {
        Ok(directory) if directory.is_empty() => {
            println!("Stadiums: FAILED - no stadiums loaded")
        }
        Ok(directory) => println!("Stadiums: OK ({} loaded)", directory.len()),
        Err(e) => println!("Stadiums: FAILED - {}", e),
    }

    let Some(api) = config.weather_api() else {
        println!("OpenWeatherMap: NOT CONFIGURED");
        std::process::exit(1);
    };

    let client = OpenWeatherMapClient::new(api.clone());
    match client.test_connection(CHECK_LATITUDE, CHECK_LONGITUDE).await {
        Ok(true) => println!("OpenWeatherMap: OK"),
        Ok(false) => {
            println!("OpenWeatherMap: FAILED (unexpected response)");
            std::process::exit(1);
        }
        Err(e) => {
            println!("OpenWeatherMap: FAILED - {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
