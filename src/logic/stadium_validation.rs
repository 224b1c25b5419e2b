use crate::error::{GamedayError, Result};
use crate::models::League;
use serde_json::Value;
use std::path::Path;

const REQUIRED_FIELDS: &[&str] = &["location", "team", "latitude", "longitude"];
const MIN_NFL_STADIUMS: usize = 30;
const MIN_NCAA_STADIUMS: usize = 100;

/// (latitude range, longitude range) per region
const US_BOUNDS: &[((f64, f64), (f64, f64))] = &[
    ((24.7, 49.4), (-125.0, -66.9)),   // continental
    ((51.0, 71.5), (-180.0, -130.0)),  // Alaska
    ((18.7, 22.5), (-160.3, -154.5)),  // Hawaii
];

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub nfl_count: usize,
    pub ncaa_count: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn validate_file(path: &Path) -> Result<ValidationReport> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        GamedayError::NotFound(format!("File not found: {} ({})", path.display(), e))
    })?;
    validate_directory_json(&content)
}

/// Check a stadium file's structure, fields and coordinates.
///
/// Low stadium counts are reported as warnings; everything else is an error.
pub fn validate_directory_json(json: &str) -> Result<ValidationReport> {
    let data: Value = serde_json::from_str(json)?;
    let mut report = ValidationReport::default();

    let Some(root) = data.as_object() else {
        report
            .errors
            .push("Invalid JSON structure: root must be an object".into());
        return Ok(report);
    };

    if !root.contains_key("nfl") || !root.contains_key("ncaa") {
        report
            .errors
            .push("Missing required sections: 'nfl' and 'ncaa'".into());
        return Ok(report);
    }

    for league in [League::Nfl, League::Ncaa] {
        let count = validate_section(&root[league.section()], league, &mut report.errors);
        match league {
            League::Nfl => report.nfl_count = count,
            League::Ncaa => report.ncaa_count = count,
        }
    }

    if report.nfl_count < MIN_NFL_STADIUMS {
        report.warnings.push(format!(
            "Too few NFL stadiums: found {}, expected at least {}",
            report.nfl_count, MIN_NFL_STADIUMS
        ));
    }
    if report.ncaa_count < MIN_NCAA_STADIUMS {
        report.warnings.push(format!(
            "Too few NCAA stadiums: found {}, expected at least {}",
            report.ncaa_count, MIN_NCAA_STADIUMS
        ));
    }

    tracing::info!(
        nfl = report.nfl_count,
        ncaa = report.ncaa_count,
        errors = report.errors.len(),
        "Stadium validation complete"
    );

    Ok(report)
}

fn validate_section(section: &Value, league: League, errors: &mut Vec<String>) -> usize {
    let Some(stadiums) = section.as_object() else {
        errors.push(format!("{} section must be an object", league));
        return 0;
    };

    for (name, stadium) in stadiums {
        for field in REQUIRED_FIELDS {
            if stadium.get(field).is_none() {
                errors.push(format!(
                    "{} stadium '{}' missing required field: {}",
                    league, name, field
                ));
            }
        }

        let (Some(lat), Some(lon)) = (stadium.get("latitude"), stadium.get("longitude")) else {
            continue;
        };
        let (Some(lat), Some(lon)) = (coordinate(lat), coordinate(lon)) else {
            errors.push(format!(
                "{} stadium '{}' has invalid coordinate format",
                league, name
            ));
            continue;
        };

        if !(-90.0..=90.0).contains(&lat) {
            errors.push(format!(
                "{} stadium '{}' has invalid latitude: {}",
                league, name, lat
            ));
        }
        if !(-180.0..=180.0).contains(&lon) {
            errors.push(format!(
                "{} stadium '{}' has invalid longitude: {}",
                league, name, lon
            ));
        }
        if !is_in_us_bounds(lat, lon) {
            errors.push(format!(
                "{} stadium '{}' coordinates outside US bounds: {}, {}",
                league, name, lat, lon
            ));
        }
    }

    stadiums.len()
}

// Numbers or numeric strings are accepted
fn coordinate(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn is_in_us_bounds(lat: f64, lon: f64) -> bool {
    US_BOUNDS.iter().any(|((lat_min, lat_max), (lon_min, lon_max))| {
        (*lat_min..=*lat_max).contains(&lat) && (*lon_min..=*lon_max).contains(&lon)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_stadiums_have_no_errors() {
        let report =
            validate_directory_json(include_str!("../../data/stadiums.json")).unwrap();
        assert!(report.is_valid(), "{:?}", report.errors);
        assert_eq!(report.nfl_count, 30);
        // Only a sample of college venues ships with the binary
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("NCAA"));
    }

    #[test]
    fn root_must_be_object() {
        let report = validate_directory_json("[]").unwrap();
        assert_eq!(
            report.errors,
            vec!["Invalid JSON structure: root must be an object"]
        );
    }

    #[test]
    fn both_sections_required() {
        let report = validate_directory_json(r#"{ "nfl": {} }"#).unwrap();
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("Missing required sections"));
    }

    #[test]
    fn reports_missing_fields_and_bad_coordinates() {
        let json = r#"{
            "nfl": {
                "Wembley Stadium": { "team": "London", "location": "London", "latitude": 51.556, "longitude": -0.2796 },
                "Half Field": { "team": "Nobody", "latitude": 40.0, "longitude": -80.0 }
            },
            "ncaa": {
                "Aloha Stadium": { "team": "Hawaii Rainbow Warriors", "location": "Honolulu, HI", "latitude": "21.3728", "longitude": "-157.93" },
                "Bad Stadium": { "team": "X", "location": "Y", "latitude": "north", "longitude": 1 },
                "Upside Down": { "team": "X", "location": "Y", "latitude": 95.0, "longitude": -80.0 }
            }
        }"#;
        let report = validate_directory_json(json).unwrap();

        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("'Wembley Stadium' coordinates outside US bounds")));
        assert!(report
            .errors
            .iter()
            .any(|e| e == "NFL stadium 'Half Field' missing required field: location"));
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("'Bad Stadium' has invalid coordinate format")));
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("'Upside Down' has invalid latitude: 95")));
        assert!(!report.errors.iter().any(|e| e.contains("Aloha")));
        assert_eq!(report.ncaa_count, 3);
    }

    #[test]
    fn us_bounds_include_alaska_and_hawaii() {
        assert!(is_in_us_bounds(44.5013, -88.0622));
        assert!(is_in_us_bounds(61.2, -149.9));
        assert!(is_in_us_bounds(21.37, -157.93));
        assert!(!is_in_us_bounds(51.556, -0.2796));
    }
}
