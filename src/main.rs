mod accounts;
mod app;
mod config;
mod db;
mod error;
mod extractors;
mod pagination;
mod resources;
mod state;
mod validation;

use crate::{app::build_app, config::AppConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "edu4all=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    tracing::info!(database = %config.database.url, "opening store");
    let state = AppState::init(config).await?;
    let addr = state.config.bind_addr();

    app::serve(build_app(state), &addr).await
}
