//! Widget Desk - A state-managed HTTP server hosting small single-screen widgets
//!
//! This is the main entry point for the widget-desk application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use widget_desk::{
    api::create_router,
    config::Config,
    services::HttpJokeSource,
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("widget_desk={},tower_http=info", config.log_level()))
        .init();

    info!("Starting widget-desk server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms, joke_url={}",
          config.host, config.port, config.tick_ms, config.joke_url);

    let joke_source = Arc::new(HttpJokeSource::new(config.joke_url.clone()));
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.tick_period(),
        joke_source,
    ));

    // The joke widget loads once on display
    let joke_state = Arc::clone(&state);
    tokio::spawn(async move {
        if let Err(e) = joke_state.refresh_joke().await {
            tracing::error!("Initial joke load failed: {}", e);
        }
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /countdown            - Countdown view");
    info!("  POST /countdown/duration   - Set duration {{\"input\": \"<seconds>\"}}");
    info!("  POST /countdown/start|pause|reset");
    info!("  GET  /guessing             - Guessing game view");
    info!("  POST /guessing/start|pause|resume|try-again");
    info!("  POST /guessing/guess       - Guess {{\"input\": \"<1-10>\"}}");
    info!("  GET  /joke                 - Current joke");
    info!("  POST /joke/refresh         - Fetch a new joke");
    info!("  GET  /tip                  - Tip calculator view");
    info!("  POST /tip/bill|percentage  - Set input {{\"input\": \"<number>\"}}");
    info!("  POST /tip/calculate");
    info!("  GET  /status               - Server status");
    info!("  GET  /health               - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Signal handling failed: {}", e),
            }
        }
    }

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
