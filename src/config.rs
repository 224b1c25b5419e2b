use crate::datasources::RetryPolicy;
use crate::error::{GamedayError, Result};
use crate::models::MM_PER_INCH;
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub openweathermap: Option<OpenWeatherMapConfig>,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub stadiums: StadiumsConfig,
    #[serde(default)]
    pub alerts: AlertThresholds,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FetchConfig {
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub cache_ttl_minutes: i64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_ms: 1000,
            cache_ttl_minutes: 30,
        }
    }
}

impl FetchConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.retry_delay_ms))
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::TimeDelta::try_minutes(self.cache_ttl_minutes.max(0))
            .unwrap_or(chrono::TimeDelta::MAX)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StadiumsConfig {
    /// Override file in the `{ "nfl": {...}, "ncaa": {...} }` layout
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub high_temp_f: f64,
    pub low_temp_f: f64,
    pub wind_speed_mph: f64,
    pub rain_in_per_hr: f64,
    pub snow_in_per_hr: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        // Rain and snow defaults are 5 mm and 2 mm per 3-hour bucket
        Self {
            high_temp_f: 90.0,
            low_temp_f: 32.0,
            wind_speed_mph: 20.0,
            rain_in_per_hr: 5.0 / MM_PER_INCH / 3.0,
            snow_in_per_hr: 2.0 / MM_PER_INCH / 3.0,
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(GamedayError::Config(format!(
                "Config file not found at {:?}. Run `gameday init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| GamedayError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml_str(&config_str)
    }

    /// Load the config if one exists, otherwise fall back to defaults
    pub fn load_or_default(config_override: Option<PathBuf>) -> Result<Self> {
        if Self::exists(config_override.as_ref()) {
            Self::load(config_override)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        serde_yaml::from_str(&content)
            .map_err(|e| GamedayError::Config(format!("Failed to parse config: {}", e)))
    }

    /// The OpenWeatherMap settings, if configured with a key and enabled
    pub fn weather_api(&self) -> Option<&OpenWeatherMapConfig> {
        self.openweathermap
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty() && !c.api_key.starts_with("${"))
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        Self::default_config_path()
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/gameday-weather/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GamedayError::Config("Cannot determine config directory".into()))?
            .join("gameday-weather");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up Gameday Weather!");
        println!();

        // --- OpenWeatherMap ---
        println!("OpenWeatherMap (leave blank to read OPENWEATHER_API_KEY from the environment)");
        let api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| GamedayError::Config(format!("Input error: {}", e)))?;

        let api_key = if api_key.is_empty() {
            "${OPENWEATHER_API_KEY}".to_string()
        } else {
            api_key
        };

        println!();

        // --- Fetching ---
        println!("Fetching");
        let defaults = FetchConfig::default();
        let max_retries: u32 = Input::new()
            .with_prompt("  Retries per stadium")
            .default(defaults.max_retries)
            .interact_text()
            .map_err(|e| GamedayError::Config(format!("Input error: {}", e)))?;

        let cache_ttl_minutes: i64 = Input::new()
            .with_prompt("  Forecast cache lifetime (minutes)")
            .default(defaults.cache_ttl_minutes)
            .interact_text()
            .map_err(|e| GamedayError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            openweathermap: Some(OpenWeatherMapConfig {
                api_key,
                enabled: true,
            }),
            fetch: FetchConfig {
                max_retries,
                cache_ttl_minutes,
                ..defaults
            },
            stadiums: StadiumsConfig::default(),
            alerts: AlertThresholds::default(),
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| GamedayError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# Gameday Weather Configuration\n# Generated by `gameday init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("GAMEDAY_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| GamedayError::Config("Cannot determine data directory".into()))?
            .join("gameday-weather");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("forecast_cache.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_yaml_str("{}").unwrap();
        assert!(config.openweathermap.is_none());
        assert_eq!(config.fetch.max_retries, 3);
        assert_eq!(config.fetch.retry_delay_ms, 1000);
        assert_eq!(config.fetch.cache_ttl().num_minutes(), 30);
        assert_eq!(config.alerts.high_temp_f, 90.0);
        assert!(config.stadiums.path.is_none());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let yaml = r#"
openweathermap:
  api_key: abc123
fetch:
  max_retries: 5
alerts:
  wind_speed_mph: 25
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        let owm = config.weather_api().unwrap();
        assert_eq!(owm.api_key, "abc123");
        assert!(owm.enabled);
        assert_eq!(config.fetch.max_retries, 5);
        assert_eq!(config.fetch.cache_ttl_minutes, 30);
        assert_eq!(config.alerts.wind_speed_mph, 25.0);
        assert_eq!(config.alerts.low_temp_f, 32.0);

        let policy = config.fetch.retry_policy();
        assert_eq!(policy.max_attempts(), 6);
        assert_eq!(policy.delay, Duration::from_secs(1));
    }

    #[test]
    fn huge_cache_ttl_saturates() {
        let yaml = "fetch:\n  cache_ttl_minutes: 9223372036854775807\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.fetch.cache_ttl(), chrono::TimeDelta::MAX);

        let negative = Config::from_yaml_str("fetch:\n  cache_ttl_minutes: -5\n").unwrap();
        assert_eq!(negative.fetch.cache_ttl(), chrono::TimeDelta::zero());
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("GAMEDAY_TEST_OWM_KEY", "from-env");
        let yaml = "openweathermap:\n  api_key: ${GAMEDAY_TEST_OWM_KEY}\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.weather_api().unwrap().api_key, "from-env");
    }

    #[test]
    fn unresolved_placeholder_is_not_a_usable_key() {
        let yaml = "openweathermap:\n  api_key: ${GAMEDAY_TEST_UNSET_VARIABLE}\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert!(config.openweathermap.is_some());
        assert!(config.weather_api().is_none());
    }

    #[test]
    fn disabled_api_is_ignored() {
        let yaml = "openweathermap:\n  api_key: abc\n  enabled: false\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert!(config.weather_api().is_none());
    }

    #[test]
    fn debug_redacts_api_key() {
        let owm = OpenWeatherMapConfig {
            api_key: "super-secret".into(),
            enabled: true,
        };
        let debug = format!("{:?}", owm);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn invalid_yaml_is_config_error() {
        assert!(matches!(
            Config::from_yaml_str("fetch: [1, 2"),
            Err(GamedayError::Config(_))
        ));
    }
}
