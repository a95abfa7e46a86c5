use thiserror::Error;

use crate::client::ClientError;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("concurrency must be at least 1, got {0}")]
    InvalidConcurrency(usize),

    #[error("fleet client already carries a compound filter: {0:?}")]
    CompoundFilterNotEmpty(Vec<String>),

    #[error(transparent)]
    Client(#[from] ClientError),
}
