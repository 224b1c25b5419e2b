use crate::error::{GamedayError, Result};
use crate::models::{League, Stadium};
use chrono::NaiveTime;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

pub const BUILTIN_STADIUMS: &str = include_str!("../../data/stadiums.json");

// Stadium file layout: { "nfl": { "<stadium>": {...} }, "ncaa": { ... } }
#[derive(Debug, Deserialize)]
struct StadiumFile {
    #[serde(default)]
    nfl: BTreeMap<String, StadiumEntry>,
    #[serde(default)]
    ncaa: BTreeMap<String, StadiumEntry>,
}

#[derive(Debug, Deserialize)]
struct StadiumEntry {
    team: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    location: Option<String>,
    kickoff_utc: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StadiumDirectory {
    stadiums: Vec<Stadium>,
}

impl StadiumDirectory {
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_STADIUMS)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GamedayError::Config(format!(
                "Failed to read stadium file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// Load from the configured override file, or the built-in list
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::builtin(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: StadiumFile = serde_json::from_str(json)?;

        let mut stadiums = Vec::with_capacity(file.nfl.len() + file.ncaa.len());
        for (league, section) in [(League::Nfl, file.nfl), (League::Ncaa, file.ncaa)] {
            for (name, entry) in section {
                match convert_entry(league, &name, entry) {
                    Some(stadium) => stadiums.push(stadium),
                    None => tracing::warn!(
                        "Skipping {} stadium '{}' with incomplete data",
                        league,
                        name
                    ),
                }
            }
        }

        tracing::debug!("Loaded {} stadiums", stadiums.len());
        Ok(Self { stadiums })
    }

    pub fn all(&self) -> &[Stadium] {
        &self.stadiums
    }

    pub fn len(&self) -> usize {
        self.stadiums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stadiums.is_empty()
    }

    pub fn by_league(&self, league: League) -> Vec<&Stadium> {
        self.stadiums.iter().filter(|s| s.league == league).collect()
    }

    pub fn find_team(&self, team: &str) -> Result<&Stadium> {
        self.stadiums
            .iter()
            .find(|s| s.has_team(team))
            .ok_or_else(|| GamedayError::NotFound(format!("No stadium for team '{}'", team)))
    }

    pub fn search(&self, query: &str) -> Vec<&Stadium> {
        self.stadiums.iter().filter(|s| s.matches(query)).collect()
    }

    /// Unique, sorted team names for a league
    pub fn team_names(&self, league: League) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .by_league(league)
            .into_iter()
            .flat_map(|s| s.teams.iter().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

fn convert_entry(league: League, name: &str, entry: StadiumEntry) -> Option<Stadium> {
    let teams = Stadium::split_teams(entry.team.as_deref()?);
    if teams.is_empty() {
        return None;
    }

    let default_kickoff_utc = match entry.kickoff_utc.as_deref() {
        Some(raw) => match NaiveTime::parse_from_str(raw, "%H:%M") {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("Invalid kickoff '{}' for '{}': {}", raw, name, e);
                league.default_kickoff_utc()
            }
        },
        None => league.default_kickoff_utc(),
    };

    Some(Stadium {
        name: name.to_string(),
        teams,
        league,
        latitude: entry.latitude?,
        longitude: entry.longitude?,
        location: entry.location.unwrap_or_default(),
        default_kickoff_utc,
    })
}
