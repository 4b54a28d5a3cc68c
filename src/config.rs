use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

/// Units of measurement supported by OpenWeatherMap
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Metric,
    Imperial,
    Standard,
}

impl Unit {
    /// Value for the `units` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Unit::Metric => "metric",
            Unit::Imperial => "imperial",
            Unit::Standard => "standard",
        }
    }

    /// Temperature symbol shown on the dashboard
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Metric => "C",
            Unit::Imperial => "F",
            Unit::Standard => "K",
        }
    }
}

#[derive(Deserialize)]
pub struct OpenWeatherMap {
    #[serde(default)]
    pub api_key: String,
    pub city: String,
    pub state_code: String,
    pub country_code: String,
    pub unit: Unit,
}

#[derive(Deserialize)]
pub struct Http {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

impl Default for Http {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay(),
        }
    }
}

fn default_timeout() -> u64 { 30 }
fn default_max_retries() -> u32 { 5 }
fn default_retry_delay() -> u64 { 500 }

#[derive(Deserialize)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub open_weather_map: OpenWeatherMap,
    #[serde(default)]
    pub http: Http,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items.
/// If the environment variable `OPEN_WEATHER_MAP_API_KEY` is set it overrides the api key
/// given in the file.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    let mut config = parse_config(&toml)?;

    if let Ok(api_key) = std::env::var("OPEN_WEATHER_MAP_API_KEY") {
        config.open_weather_map.api_key = api_key;
    }

    if config.open_weather_map.api_key.is_empty() {
        return Err(ConfigError::from("no OpenWeatherMap api key configured"));
    }

    Ok(config)
}

/// Parses configuration from a toml string
///
/// # Arguments
///
/// * 'toml' - the configuration document
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.http.max_retries == 0 {
        return Err(ConfigError::from("http.max_retries must be at least 1"));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
[open_weather_map]
api_key = "abc123"
city = "Toronto"
state_code = "ON"
country_code = "CA"
unit = "metric"

[general]
log_level = "Info"
log_to_stdout = true
"#;

    #[test]
    fn test_parse_config_with_defaults() {
        let config = parse_config(CONFIG).unwrap();
        assert_eq!(config.open_weather_map.city, "Toronto");
        assert_eq!(config.open_weather_map.unit, Unit::Metric);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.max_retries, 5);
        assert_eq!(config.general.log_level, LevelFilter::Info);
        assert!(config.general.log_path.is_none());
    }

    #[test]
    fn test_parse_config_with_http() {
        let toml = format!("{}\n[http]\nmax_retries = 2\nretry_delay_ms = 100\n", CONFIG);
        let config = parse_config(&toml).unwrap();
        assert_eq!(config.http.max_retries, 2);
        assert_eq!(config.http.retry_delay_ms, 100);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_zero_retries_rejected() {
        let toml = format!("{}\n[http]\nmax_retries = 0\n", CONFIG);
        assert!(parse_config(&toml).is_err());
    }

    #[test]
    fn test_unknown_unit_rejected() {
        let toml = CONFIG.replace("\"metric\"", "\"kelvin\"");
        assert!(parse_config(&toml).is_err());
    }

    #[test]
    fn test_unit_symbols() {
        assert_eq!(Unit::Metric.symbol(), "C");
        assert_eq!(Unit::Imperial.symbol(), "F");
        assert_eq!(Unit::Imperial.as_query(), "imperial");
    }
}
