use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid logger format: {0} (expected: text|json)")]
    InvalidFormat(String),

    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("logger has already been initialized")]
    AlreadyInitialized,

    #[error("failed to initialize logger: {0}")]
    InitializationFailed(String),
}
