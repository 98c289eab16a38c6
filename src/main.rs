//! warbler - Application entry point

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use warbler::{
    api::{create_router, AppState},
    cli::{Cli, Commands, ServeArgs},
    config::Config,
    errors::{AppError, AppResult},
    infra::{Database, SqlStore},
    services::Warbler,
    session::{MemorySessions, SessionStore},
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = Config::from_env();
    tracing::debug!("Configuration loaded");

    let result = match cli.command {
        Commands::Serve(args) => serve(args, config).await,
        Commands::Migrate => migrate(config).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Start the HTTP server.
async fn serve(args: ServeArgs, mut config: Config) -> AppResult<()> {
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    let database = Arc::new(Database::connect(&config).await?);

    let store = SqlStore::new(database.get_connection());
    let service = Arc::new(Warbler::new(
        store.users.clone(),
        store.users.clone(),
        store.tweets.clone(),
        store.subscriptions.clone(),
    ));
    let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessions::new(config.session_ttl()));

    let state = AppState::new(service, sessions, database);
    let app = create_router(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("failed to bind {}: {}", addr, e)))?;

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("server error: {}", e)))
}

/// Run pending migrations and exit.
async fn migrate(config: Config) -> AppResult<()> {
    let database = Database::connect_without_migrations(&config).await?;
    database.run_migrations().await?;
    tracing::info!("Migrations applied");
    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}
