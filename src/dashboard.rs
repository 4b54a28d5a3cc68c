use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use log::{error, info, warn};
use serde::Serialize;
use crate::config::Unit;
use crate::errors::ForecastError;
use crate::forecast::{aggregate, FORECAST_DAYS};
use crate::manager_owm::errors::OwmError;
use crate::manager_owm::{to_observations, OpenWeatherMap};
use crate::models::forecast::{CurrentConditions, DayAggregate};
use crate::models::open_weather_map::{ForecastResponse, WeatherResponse};

const NO_DATA: &str = "No data";
const NO_TEMPERATURE: i32 = 99;
const NO_ICON: &str = "01d";

/// Anything that can provide current weather and forecast documents
pub trait WeatherSource {
    fn current_weather(&self) -> Result<WeatherResponse, OwmError>;
    fn forecast(&self) -> Result<ForecastResponse, OwmError>;
}

impl WeatherSource for OpenWeatherMap {
    fn current_weather(&self) -> Result<WeatherResponse, OwmError> {
        self.get_current_weather()
    }

    fn forecast(&self) -> Result<ForecastResponse, OwmError> {
        self.get_forecast()
    }
}

/// Current weather as shown on the dashboard
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Weather {
    pub city: String,
    pub temperature: i32,
    pub hi: i32,
    pub lo: i32,
    pub unit: String,
    pub description: String,
    pub icon: String,
    pub timezone_offset: i32,
}

/// One forecast day as shown on the dashboard
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ForecastDay {
    pub day: String,
    pub city: String,
    pub hi: i32,
    pub lo: i32,
    pub unit: String,
    pub morning_description: String,
    pub noon_description: String,
    pub evening_description: String,
    pub morning_icon: Option<String>,
    pub noon_icon: Option<String>,
    pub evening_icon: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct CurrentTime {
    pub clock: String,
    pub date: String,
    pub local: NaiveDateTime,
}

/// Everything the presentation layer needs to render the dashboard
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Dashboard {
    pub weather: Weather,
    pub time: CurrentTime,
    pub forecast: Vec<ForecastDay>,
}

/// Weather shown when no current weather could be retrieved
pub fn default_weather() -> Weather {
    Weather {
        city: NO_DATA.to_string(),
        temperature: NO_TEMPERATURE,
        hi: NO_TEMPERATURE,
        lo: NO_TEMPERATURE,
        unit: "C".to_string(),
        description: format!("{}.", NO_DATA),
        icon: NO_ICON.to_string(),
        timezone_offset: 0,
    }
}

/// Forecast shown when no forecast could be produced
pub fn default_forecast() -> Vec<ForecastDay> {
    let day = ForecastDay {
        day: "ERROR".to_string(),
        city: NO_DATA.to_string(),
        hi: NO_TEMPERATURE,
        lo: NO_TEMPERATURE,
        unit: "C".to_string(),
        morning_description: format!("{}.", NO_DATA),
        noon_description: NO_DATA.to_string(),
        evening_description: NO_DATA.to_string(),
        morning_icon: Some(NO_ICON.to_string()),
        noon_icon: Some(NO_ICON.to_string()),
        evening_icon: Some(NO_ICON.to_string()),
    };

    vec![day; FORECAST_DAYS]
}

/// Local clock and date given an offset from UTC in seconds
///
/// # Arguments
///
/// * 'now' - current time in UTC
/// * 'tz_offset' - offset from UTC in seconds, if known
pub fn clock_and_date(now: DateTime<Utc>, tz_offset: Option<i32>) -> CurrentTime {
    let local = now.naive_utc() + TimeDelta::seconds(tz_offset.unwrap_or(0) as i64);

    CurrentTime {
        clock: local.format("%H:%M").to_string(),
        date: local.format("%A, %b %d").to_string(),
        local,
    }
}

/// Transforms a current weather document to the dashboard representation.
/// Temperatures are truncated towards zero.
///
/// # Arguments
///
/// * 'doc' - current weather document
/// * 'city' - city name to show
/// * 'unit' - unit the temperatures are given in
pub fn to_weather(doc: &WeatherResponse, city: &str, unit: Unit) -> Result<Weather, OwmError> {
    let main = doc.main
        .as_ref()
        .ok_or(OwmError::Document("weather document has no main values".to_string()))?;
    let condition = doc.weather
        .first()
        .ok_or(OwmError::Document("weather document has no conditions".to_string()))?;

    Ok(Weather {
        city: city.to_string(),
        temperature: main.temp as i32,
        hi: main.temp_max as i32,
        lo: main.temp_min as i32,
        unit: unit.symbol().to_string(),
        description: condition.description.to_string(),
        icon: condition.icon.to_string(),
        timezone_offset: doc.timezone,
    })
}

/// Transforms an aggregated day to the dashboard representation
///
/// # Arguments
///
/// * 'day' - aggregated forecast day
/// * 'city' - city name to show
/// * 'unit' - unit the temperatures are given in
pub fn to_forecast_day(day: &DayAggregate, city: &str, unit: Unit) -> ForecastDay {
    ForecastDay {
        day: day.day.to_string(),
        city: city.to_string(),
        hi: day.hi,
        lo: day.lo,
        unit: unit.symbol().to_string(),
        morning_description: day.morning.condition.to_string(),
        noon_description: day.noon.condition.to_string(),
        evening_description: day.evening.condition.to_string(),
        morning_icon: day.morning.icon.clone(),
        noon_icon: day.noon.icon.clone(),
        evening_icon: day.evening.icon.clone(),
    }
}

/// Failures that make the forecast section fall back to its default
#[derive(Debug)]
enum ForecastFailure {
    Fetch(OwmError),
    Aggregate(ForecastError),
}

impl From<OwmError> for ForecastFailure {
    fn from(e: OwmError) -> Self { ForecastFailure::Fetch(e) }
}
impl From<ForecastError> for ForecastFailure {
    fn from(e: ForecastError) -> Self { ForecastFailure::Aggregate(e) }
}

/// Builds the dashboard context.
///
/// The dashboard must always render, so each section falls back to its default independently:
/// a failing current weather call gives default weather, and a failing forecast call or
/// aggregation gives a default forecast. Each fallback is logged with its cause.
///
/// # Arguments
///
/// * 'source' - where to get weather documents from
/// * 'city' - city name to show
/// * 'unit' - unit the temperatures are given in
/// * 'now' - current time in UTC
pub fn build_dashboard(source: &impl WeatherSource, city: &str, unit: Unit, now: DateTime<Utc>) -> Dashboard {
    let fetched_weather = source.current_weather().and_then(|doc| to_weather(&doc, city, unit));
    let (weather, tz_offset) = match fetched_weather {
        Ok(w) => {
            let offset = w.timezone_offset;
            (w, Some(offset))
        },
        Err(e) => {
            warn!("using default weather: {}", e);
            (default_weather(), None)
        },
    };

    let time = clock_and_date(now, tz_offset);

    let forecast = match build_forecast(source, &weather, &time, city, unit) {
        Ok(forecast) => forecast,
        Err(ForecastFailure::Fetch(e)) => {
            warn!("using default forecast: {}", e);
            default_forecast()
        },
        Err(ForecastFailure::Aggregate(e @ ForecastError::UnknownConditionFamily(_)))
        | Err(ForecastFailure::Aggregate(e @ ForecastError::MalformedIcon(_))) => {
            error!("using default forecast, upstream icon scheme changed: {}", e);
            default_forecast()
        },
        Err(ForecastFailure::Aggregate(e)) => {
            error!("using default forecast: {}", e);
            default_forecast()
        },
    };

    info!("dashboard built for {} at {}", city, time.clock);

    Dashboard { weather, time, forecast }
}

fn build_forecast(source: &impl WeatherSource, weather: &Weather, time: &CurrentTime, city: &str, unit: Unit)
    -> Result<Vec<ForecastDay>, ForecastFailure> {

    let doc = source.forecast()?;
    let (observations, utc_offset) = to_observations(&doc)?;

    let current = CurrentConditions { hi: weather.hi, lo: weather.lo, icon: weather.icon.to_string() };
    let days = aggregate(&observations, utc_offset, time.local.date(), &current)?;

    Ok(days.iter().map(|d| to_forecast_day(d, city, unit)).collect())
}
