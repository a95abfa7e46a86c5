use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("discovery failed: {0}")]
    Discovery(String),

    #[error("no reply from {0}")]
    NoReply(String),
}
