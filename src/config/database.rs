use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::BootstrapSettings;
use crate::errors::internal::DatabaseError;
use crate::errors::InternalError;

/// Owned handle to the document store
///
/// Created once at startup, cloned into the stores and closed at shutdown.
/// Nothing else opens connections.
#[derive(Clone, Debug)]
pub struct DatabaseConnections {
    pub inventory: DatabaseConnection,
}

impl DatabaseConnections {
    /// Connect using the configured `DATABASE_URL`
    ///
    /// Does NOT run migrations - call `migrate()` separately.
    pub async fn init(bootstrap_settings: &BootstrapSettings) -> Result<Self, InternalError> {
        Self::connect(bootstrap_settings.database_url()).await
    }

    pub async fn connect(database_url: &str) -> Result<Self, InternalError> {
        let inventory = Database::connect(database_url)
            .await
            .map_err(|source| DatabaseError::Connect { source })?;

        tracing::debug!(
            "Connected to inventory database: {}",
            redact_database_url(database_url)
        );

        Ok(Self { inventory })
    }

    /// Run all pending migrations
    pub async fn migrate(&self) -> Result<(), InternalError> {
        Migrator::up(&self.inventory, None)
            .await
            .map_err(|source| DatabaseError::Migrate { source })?;

        tracing::debug!("Inventory database migrations completed");

        Ok(())
    }

    /// Close the underlying connection pool
    pub async fn close(self) -> Result<(), InternalError> {
        self.inventory
            .close()
            .await
            .map_err(|e| InternalError::database("close_database", e))?;

        tracing::debug!("Inventory database connection closed");

        Ok(())
    }
}

/// Database URL with any password in the userinfo replaced by `***`
pub fn redact_database_url(database_url: &str) -> String {
    let Some((scheme, rest)) = database_url.split_once("://") else {
        return database_url.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let Some(at) = rest[..authority_end].rfind('@') else {
        return database_url.to_string();
    };
    let Some((user, _password)) = rest[..at].split_once(':') else {
        return database_url.to_string();
    };

    format!("{}://{}:***{}", scheme, user, &rest[at..])
}
