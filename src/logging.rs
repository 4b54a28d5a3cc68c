use std::path::PathBuf;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::General;
use crate::errors::LoggingError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} | {l} | {m}{n}";
const LOG_FILE_SIZE: u64 = 10 * 1024 * 1024;
const LOG_ARCHIVES: u32 = 4;

/// Resolves the directory to log to, defaulting to `.weatherdash` in the home directory
///
/// # Arguments
///
/// * 'log_path' - configured log directory, if any
pub fn log_dir(log_path: &Option<String>) -> Result<PathBuf, LoggingError> {
    match log_path {
        Some(p) => Ok(PathBuf::from(p)),
        None => dirs::home_dir()
            .map(|h| h.join(".weatherdash"))
            .ok_or(LoggingError("unable to determine home directory".to_string())),
    }
}

/// Sets up log4rs with a rolling log file and, if configured, logging to stdout
///
/// # Arguments
///
/// * 'general' - general configuration including log level and path
pub fn setup_logger(general: &General) -> Result<(), LoggingError> {
    let dir = log_dir(&general.log_path)?;
    std::fs::create_dir_all(&dir)?;

    let archive_pattern = dir.join("logs.{}.log");
    let roller = FixedWindowRoller::builder()
        .base(1)
        .build(&archive_pattern.to_string_lossy(), LOG_ARCHIVES)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(LOG_FILE_SIZE)), Box::new(roller));

    let file = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(dir.join("logs.log"), Box::new(policy))?;

    let mut builder = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    let config = builder.build(root.build(general.log_level))?;
    let _ = log4rs::init_config(config)?;

    Ok(())
}
