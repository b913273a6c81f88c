use std::sync::Arc;

use clap::Parser;
use poem::listener::TcpListener;
use poem::Server;

use inventory_backend::api::build_routes;
use inventory_backend::app_data::AppData;
use inventory_backend::cli::{migrate, Cli, Commands};
use inventory_backend::config::database::redact_database_url;
use inventory_backend::config::{init_logging, BootstrapSettings, DatabaseConnections};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();
    let settings = BootstrapSettings::from_env()?;

    match cli.command() {
        Commands::Migrate => migrate::run_migrations(&settings).await?,
        Commands::Serve => serve(settings).await?,
    }

    Ok(())
}

async fn serve(settings: BootstrapSettings) -> Result<(), Box<dyn std::error::Error>> {
    let connections = DatabaseConnections::init(&settings).await?;
    connections.migrate().await?;
    tracing::info!(
        "Connected to database: {}",
        redact_database_url(settings.database_url())
    );

    let app_data = Arc::new(AppData::init(connections.clone(), &settings)?);
    let app = build_routes(app_data);

    let address = settings.server_address();
    tracing::info!("Starting server on http://{}", address);
    tracing::info!("Swagger UI available at http://{}/swagger", address);

    Server::new(TcpListener::bind(address))
        .run_with_graceful_shutdown(
            app,
            async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutdown signal received");
            },
            None,
        )
        .await?;

    connections.close().await?;
    tracing::info!("Server stopped");

    Ok(())
}
