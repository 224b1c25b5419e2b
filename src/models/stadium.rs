use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    #[serde(rename = "NFL")]
    Nfl,
    #[serde(rename = "NCAA")]
    Ncaa,
}

impl League {
    pub fn as_str(&self) -> &'static str {
        match self {
            League::Nfl => "NFL",
            League::Ncaa => "NCAA",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nfl" => Some(League::Nfl),
            "ncaa" | "college" => Some(League::Ncaa),
            _ => None,
        }
    }

    /// Section key in the stadium JSON layout
    pub fn section(&self) -> &'static str {
        match self {
            League::Nfl => "nfl",
            League::Ncaa => "ncaa",
        }
    }

    /// Typical Saturday/Sunday early kickoff, expressed in UTC
    pub fn default_kickoff_utc(&self) -> NaiveTime {
        match self {
            League::Nfl => NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            League::Ncaa => NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
        }
    }
}

impl std::fmt::Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// US kickoffs range from late morning to late night Eastern time
const NIGHT_GAME_ROLLOVER_HOUR_UTC: u32 = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stadium {
    pub name: String,
    pub teams: Vec<String>,
    pub league: League,
    pub latitude: f64,
    pub longitude: f64,
    pub location: String,
    pub default_kickoff_utc: NaiveTime,
}

impl Stadium {
    /// Split a team field like "New York Giants/New York Jets" into team names
    pub fn split_teams(team_field: &str) -> Vec<String> {
        team_field
            .split([',', '/'])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn has_team(&self, team: &str) -> bool {
        self.teams.iter().any(|t| t.eq_ignore_ascii_case(team.trim()))
    }

    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query)
            || self.location.to_lowercase().contains(&query)
            || self.teams.iter().any(|t| t.to_lowercase().contains(&query))
    }

    pub fn team_label(&self) -> String {
        self.teams.join(" / ")
    }

    /// Game time for a game played on the US calendar day `date`, at `kickoff`
    /// (UTC) or this stadium's default kickoff.
    ///
    /// A kickoff before 12:00 UTC is a night game on `date` in US time, which
    /// falls on the following UTC day.
    pub fn game_time(&self, date: NaiveDate, kickoff: Option<NaiveTime>) -> DateTime<Utc> {
        let kickoff = kickoff.unwrap_or(self.default_kickoff_utc);
        let utc_date = if kickoff.hour() < NIGHT_GAME_ROLLOVER_HOUR_UTC {
            date.succ_opt().unwrap_or(date)
        } else {
            date
        };
        utc_date.and_time(kickoff).and_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metlife() -> Stadium {
        Stadium {
            name: "MetLife Stadium".into(),
            teams: Stadium::split_teams("New York Giants/New York Jets"),
            league: League::Nfl,
            latitude: 40.8128,
            longitude: -74.0742,
            location: "East Rutherford, NJ".into(),
            default_kickoff_utc: League::Nfl.default_kickoff_utc(),
        }
    }

    #[test]
    fn split_teams_on_slash_and_comma() {
        assert_eq!(
            Stadium::split_teams("Los Angeles Rams, Los Angeles Chargers"),
            vec!["Los Angeles Rams", "Los Angeles Chargers"]
        );
        assert_eq!(Stadium::split_teams("A/B/"), vec!["A", "B"]);
    }

    #[test]
    fn team_match_is_case_insensitive() {
        let stadium = metlife();
        assert!(stadium.has_team("new york jets"));
        assert!(!stadium.has_team("New York"));
        assert!(stadium.matches("giants"));
        assert!(stadium.matches("rutherford"));
    }

    #[test]
    fn game_time_uses_default_kickoff() {
        let stadium = metlife();
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(
            stadium.game_time(date, None).to_rfc3339(),
            "2024-12-01T18:00:00+00:00"
        );
        let night = NaiveTime::from_hms_opt(1, 20, 0).unwrap();
        assert_eq!(
            stadium.game_time(date, Some(night)).to_rfc3339(),
            "2024-12-02T01:20:00+00:00"
        );
    }

    #[test]
    fn night_kickoff_lands_on_the_game_day_evening() {
        let lsu = Stadium {
            name: "Tiger Stadium".into(),
            teams: vec!["LSU Tigers".into()],
            league: League::Ncaa,
            latitude: 30.412,
            longitude: -91.1838,
            location: "Baton Rouge, LA".into(),
            default_kickoff_utc: NaiveTime::from_hms_opt(0, 30, 0).unwrap(),
        };
        let saturday = NaiveDate::from_ymd_opt(2024, 11, 9).unwrap();
        let kickoff = lsu.game_time(saturday, None);

        // 18:30 CST on Saturday
        assert_eq!(kickoff.to_rfc3339(), "2024-11-10T00:30:00+00:00");
        let central = kickoff - chrono::Duration::hours(6);
        assert_eq!(central.date_naive(), saturday);
    }

    #[test]
    fn afternoon_kickoff_keeps_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(
            metlife().game_time(date, Some(noon)).to_rfc3339(),
            "2024-12-01T12:00:00+00:00"
        );
    }

    #[test]
    fn league_parsing() {
        assert_eq!(League::from_str("NFL"), Some(League::Nfl));
        assert_eq!(League::from_str("college"), Some(League::Ncaa));
        assert_eq!(League::from_str("xfl"), None);
    }
}
