mod logger;
pub use logger::{LogFormat, LoggerConfig, LoggerError, logger_init};
