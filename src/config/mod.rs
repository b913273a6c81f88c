mod bootstrap_settings;
pub mod database;
mod env_provider;
mod errors;
mod logging;

pub use bootstrap_settings::{AppEnvironment, BootstrapSettings, MediaCredentials};
pub use database::DatabaseConnections;
pub use env_provider::{EnvironmentProvider, SystemEnvironment};
#[cfg(test)]
pub use env_provider::MockEnvironment;
pub use errors::ConfigError;
pub use logging::{init_logging, LoggingConfig, LoggingError};
