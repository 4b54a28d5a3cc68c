use thiserror::Error;

/// Errors raised by the forecast aggregation engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error("ForecastError::InvalidOffset: utc offset {0} seconds is out of range")]
    InvalidOffset(i32),
    #[error("ForecastError::UnknownConditionFamily: no priority for icon family '{0}'")]
    UnknownConditionFamily(String),
    #[error("ForecastError::MalformedIcon: icon code '{0}' is not of the form NNx")]
    MalformedIcon(String),
    #[error("ForecastError::InsufficientForecastWindow: only {0} days could be produced")]
    InsufficientForecastWindow(usize),
}

#[derive(Error, Debug)]
#[error("ConfigError: {0}")]
pub struct ConfigError(pub String);
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self { ConfigError(e.to_string()) }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}

#[derive(Error, Debug)]
#[error("LoggingError: {0}")]
pub struct LoggingError(pub String);
impl From<std::io::Error> for LoggingError {
    fn from(e: std::io::Error) -> Self { LoggingError(e.to_string()) }
}
impl From<anyhow::Error> for LoggingError {
    fn from(e: anyhow::Error) -> Self { LoggingError(e.to_string()) }
}
impl From<log4rs::config::runtime::ConfigErrors> for LoggingError {
    fn from(e: log4rs::config::runtime::ConfigErrors) -> Self { LoggingError(e.to_string()) }
}
impl From<log::SetLoggerError> for LoggingError {
    fn from(e: log::SetLoggerError) -> Self { LoggingError(e.to_string()) }
}

#[derive(Error, Debug)]
#[error("DashInitError: {0}")]
pub struct DashInitError(pub String);
impl From<ConfigError> for DashInitError {
    fn from(e: ConfigError) -> Self { DashInitError(e.to_string()) }
}
impl From<LoggingError> for DashInitError {
    fn from(e: LoggingError) -> Self { DashInitError(e.to_string()) }
}
