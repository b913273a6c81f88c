use crate::config::{BootstrapSettings, DatabaseConnections};
use crate::errors::InternalError;

/// Run database migrations for the inventory database
///
/// Connects, applies every pending migration and closes again. It does not
/// initialize the full AppData structure.
pub async fn run_migrations(settings: &BootstrapSettings) -> Result<(), InternalError> {
    tracing::info!("Running database migrations...");

    let connections = DatabaseConnections::init(settings).await?;
    connections.migrate().await?;
    connections.close().await?;

    tracing::info!("All migrations completed successfully");

    Ok(())
}
