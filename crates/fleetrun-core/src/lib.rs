pub mod client;
pub use client::{ClientError, FleetClient};

pub mod config;
pub use config::RolloutConfig;

pub mod coordinator;
pub use coordinator::Coordinator;

mod error;
pub use error::CoordinatorError;
