use clap::Parser;
use ladle::{
    api::{handlers::AppState, routes},
    cli::{Cli, Commands},
    config::Settings,
    dataset::{DatasetStore, Loader},
    Error, Result,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    // Silently ignore if file doesn't exist
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ladle=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::from_env()?;
    settings.validate()?;

    // Handle commands
    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Search { query, page } => {
            search_recipes(settings, query, page).await?;
        }
        Commands::Fetch { output } => {
            ladle::cli::commands::fetch(&settings, &output).await?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    // Override settings with CLI arguments
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Ladle server");
    info!("Dataset: {}", settings.dataset.url);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    // Initialize the dataset store
    let loader = Loader::new(
        settings.dataset.url.clone(),
        settings.dataset.user_agent.clone(),
        settings.dataset.max_size,
    )?;
    let store = Arc::new(DatasetStore::new(loader));

    // Warm the dataset in the background; a failure here is not fatal, the
    // first search will retry the load
    let warm_store = store.clone();
    tokio::spawn(async move {
        match warm_store.get_or_load().await {
            Ok(dataset) => info!("Dataset warmed: {} recipes", dataset.recipes.len()),
            Err(e) => warn!("Dataset warm-up failed: {}", e.log_safe()),
        }
    });

    // Create application state
    let state = AppState {
        store,
        settings: settings.clone(),
    };

    // Create router with rate limiting
    let app = routes::create_router(state, &settings);

    // Start server
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Ladle Recipe Search");
    println!("========================================");
    println!("Status: Running");
    println!("Address: http://{addr}");
    println!("Dataset: {}", settings.dataset.url);
    println!("\nAPI Endpoints:");
    println!("  GET  /api/search");
    println!("  GET  /api/recipes/:id");
    println!("  GET  /api/stats");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn search_recipes(settings: Settings, query: String, page: usize) -> Result<()> {
    let server_url = settings
        .server
        .external_url
        .unwrap_or_else(|| format!("http://{}:{}", settings.server.host, settings.server.port));

    ladle::cli::commands::search(&server_url, &query, page).await
}
