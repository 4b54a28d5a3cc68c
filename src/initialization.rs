use std::env;
use log::info;
use crate::config::{load_config, Config};
use crate::errors::DashInitError;
use crate::logging::setup_logger;
use crate::manager_owm::OpenWeatherMap;

/// Default location of the configuration file if `CONFIG_PATH` isn't set
const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Loads configuration, sets up logging and returns the configuration
/// together with an OpenWeatherMap struct ready for use
///
pub fn init() -> Result<(Config, OpenWeatherMap), DashInitError> {
    let config_path = env::var("CONFIG_PATH").unwrap_or(DEFAULT_CONFIG_PATH.to_string());

    let config = load_config(&config_path)?;
    setup_logger(&config.general)?;

    info!("weatherdash version: {}", env!("CARGO_PKG_VERSION"));

    let owm = OpenWeatherMap::new(&config.open_weather_map, &config.http);

    Ok((config, owm))
}
