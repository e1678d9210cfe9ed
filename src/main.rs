use std::sync::Arc;

use mcp_spoonacular::config::Config;
use mcp_spoonacular::{GroceryError, GroceryList, GroceryMcpServer};
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // The session is created once; without it no tool can work
    tracing::info!("Connecting to Spoonacular at {}...", config.base_url);
    let session = match GroceryList::connect(
        config.base_url.clone(),
        config.api_key.clone(),
        &config.profile,
    )
    .await
    {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Connect failed: {}", e);
            if matches!(e, GroceryError::Authentication(_)) {
                tracing::error!("Please verify:");
                tracing::error!("  - SPOONACULAR_API_KEY is a valid key from spoonacular.com/food-api");
                tracing::error!("  - The key still has daily points left");
            } else {
                tracing::error!("  - SPOONACULAR_BASE_URL is correct: {}", config.base_url);
            }
            std::process::exit(1);
        }
    };

    tracing::info!("Connected to Spoonacular as {}", session.username());

    let session = Arc::new(session);

    let sse_config = SseServerConfig {
        bind: config.bind_addr,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: tokio_util::sync::CancellationToken::new(),
        sse_keep_alive: None,
    };

    tracing::info!("Grocery MCP Server listening on {}", sse_config.bind);

    let sse_server = SseServer::serve_with_config(sse_config).await?;

    let ct = sse_server.with_service(move || GroceryMcpServer::new(session.clone()));

    tracing::info!("Grocery MCP Server started successfully");

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    ct.cancel();

    Ok(())
}
