mod config;
mod routes;
mod services;
mod state;

use services::store::BoardStore;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();

    let mut store = BoardStore::new();
    if config.seed_on_start {
        store.seed_if_empty();
    }
    let state = state::AppState::new(store);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .expect("failed to bind");

    tracing::info!(addr = %config.listen_addr(), "taskboard listening");
    axum::serve(listener, app).await.expect("server failed");
}
