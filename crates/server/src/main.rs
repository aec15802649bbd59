use database::db::create_connection;
use log::{error, info};
use migration::{Migrator, MigratorTrait};
use server::{app, config::Config, state::AppState, utils::shutdown::shutdown_signal};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let db = match create_connection(&config.database_url).await {
        Ok(db) => db,
        Err(err) => {
            error!("Failed to connect to the database: {err}");
            return ExitCode::FAILURE;
        }
    };

    if config.run_migrations {
        info!("Applying pending migrations");
        if let Err(err) = Migrator::up(&db, None).await {
            error!("Migration failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    let listener = match tokio::net::TcpListener::bind(config.bind_address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind {}: {err}", config.bind_address);
            return ExitCode::FAILURE;
        }
    };
    info!("Running axum on http://{}", config.bind_address);

    if let Err(err) = axum::serve(listener, app(AppState { db }))
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
