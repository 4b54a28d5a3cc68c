pub mod errors;

use std::thread;
use std::time::Duration;
use chrono::NaiveDateTime;
use log::warn;
use serde_json::Value;
use ureq::Agent;
use crate::config::{Http, OpenWeatherMap as OwmConfig, Unit};
use crate::manager_owm::errors::OwmError;
use crate::models::forecast::ForecastObservation;
use crate::models::open_weather_map::{status_code, ForecastResponse, WeatherResponse};

const REQUEST_DOMAIN: &str = "https://api.openweathermap.org";

/// Cap on the backoff exponent so the wait between attempts stays reasonable
const MAX_BACKOFF_EXP: u32 = 6;

/// Struct for fetching current weather and forecasts from OpenWeatherMap
pub struct OpenWeatherMap {
    agent: Agent,
    api_key: String,
    location: String,
    unit: Unit,
    max_retries: u32,
    retry_delay: Duration,
}

impl OpenWeatherMap {
    /// Returns an OpenWeatherMap struct ready for fetching weather documents
    ///
    /// Http error statuses are not treated as transport errors since OpenWeatherMap reports
    /// failures in the document itself (the `cod` field).
    ///
    /// # Arguments
    ///
    /// * 'config' - OpenWeatherMap configuration (location, unit and api key)
    /// * 'http' - timeout and retry configuration
    pub fn new(config: &OwmConfig, http: &Http) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(http.timeout_secs)))
            .http_status_as_error(false)
            .build();

        let agent = agent_config.into();

        Self {
            agent,
            api_key: config.api_key.to_string(),
            location: format!("{},{},{}", config.city, config.state_code, config.country_code),
            unit: config.unit,
            max_retries: http.max_retries,
            retry_delay: Duration::from_millis(http.retry_delay_ms),
        }
    }

    /// Retrieves current weather for the configured location
    ///
    pub fn get_current_weather(&self) -> Result<WeatherResponse, OwmError> {
        let json = self.get_document("/data/2.5/weather")?;

        parse_weather(&json)
    }

    /// Retrieves the 5 day / 3 hour forecast for the configured location
    ///
    pub fn get_forecast(&self) -> Result<ForecastResponse, OwmError> {
        let json = self.get_document("/data/2.5/forecast")?;

        parse_forecast(&json)
    }

    /// Gets a document from OpenWeatherMap, retrying transport errors with exponential backoff
    /// until the configured number of attempts is used up.
    ///
    /// # Arguments
    ///
    /// * 'path' - the endpoint path
    fn get_document(&self, path: &str) -> Result<String, OwmError> {
        let url = format!("{}{}", REQUEST_DOMAIN, path);

        let mut attempt: u32 = 1;
        loop {
            match self.request(&url) {
                Ok(json) => return Ok(json),
                Err(e) if attempt < self.max_retries => {
                    let delay = backoff_delay(self.retry_delay, attempt);
                    warn!("request to {} failed (attempt {}/{}): {}, retrying in {:?}",
                        path, attempt, self.max_retries, e, delay);
                    thread::sleep(delay);
                    attempt += 1;
                },
                Err(e) => return Err(OwmError::from(e)),
            }
        }
    }

    fn request(&self, url: &str) -> Result<String, ureq::Error> {
        self.agent
            .get(url)
            .query("q", &self.location)
            .query("units", self.unit.as_query())
            .query("appid", &self.api_key)
            .call()?
            .body_mut()
            .read_to_string()
    }
}

/// Delay before the next attempt, doubling for every failed attempt
///
/// # Arguments
///
/// * 'base' - delay after the first failed attempt
/// * 'attempt' - number of the attempt that just failed, starting at 1
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base * 2u32.pow(attempt.saturating_sub(1).min(MAX_BACKOFF_EXP))
}

/// Parses a current weather document and checks its status
///
/// # Arguments
///
/// * 'json' - the raw document
pub fn parse_weather(json: &str) -> Result<WeatherResponse, OwmError> {
    let doc: WeatherResponse = serde_json::from_str(json)?;
    check_status(&doc.cod, &doc.message)?;

    Ok(doc)
}

/// Parses a forecast document and checks its status
///
/// # Arguments
///
/// * 'json' - the raw document
pub fn parse_forecast(json: &str) -> Result<ForecastResponse, OwmError> {
    let doc: ForecastResponse = serde_json::from_str(json)?;
    check_status(&doc.cod, &doc.message)?;

    Ok(doc)
}

fn check_status(cod: &Value, message: &Value) -> Result<(), OwmError> {
    match status_code(cod) {
        Some(200) => Ok(()),
        code => {
            let message = match message {
                Value::String(s) => s.to_string(),
                other => other.to_string(),
            };
            Err(OwmError::Status(code.unwrap_or_default(), message))
        },
    }
}

/// Transforms a forecast document into observations and the location's offset from UTC
///
/// # Arguments
///
/// * 'doc' - the forecast document
pub fn to_observations(doc: &ForecastResponse) -> Result<(Vec<ForecastObservation>, i32), OwmError> {
    let city = doc.city
        .as_ref()
        .ok_or(OwmError::Document("forecast document has no city".to_string()))?;

    let mut observations: Vec<ForecastObservation> = Vec::with_capacity(doc.list.len());
    for entry in &doc.list {
        let weather = entry.weather
            .first()
            .ok_or(OwmError::Document(format!("no weather for {}", entry.dt_txt)))?;

        observations.push(ForecastObservation {
            date_time: NaiveDateTime::parse_from_str(&entry.dt_txt, "%Y-%m-%d %H:%M:%S")?.and_utc(),
            temp_min: entry.main.temp_min,
            temp_max: entry.main.temp_max,
            condition: weather.main.to_string(),
            icon: weather.icon.to_string(),
        });
    }

    Ok((observations, city.timezone))
}
