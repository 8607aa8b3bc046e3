mod config;
mod error;
mod routes;
mod services;
mod state;
mod views;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("assistant_studio=info,tower_http=info")),
        )
        .init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    let addr = config.listen_addr();
    let state = state::AppState::new(config);

    // Spawn background housekeeping tasks.
    let _sweeper = services::housekeeping::spawn_chat_sweeper(state.clone());
    let _session_logger = services::housekeeping::spawn_session_logger(state.subscribe_session_events());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "assistant studio listening");
    axum::serve(listener, app).await.expect("server failed");
}
