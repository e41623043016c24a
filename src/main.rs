use spotidash::{
    config, error, info,
    server::{self, AppState},
};

#[tokio::main]
async fn main() {
    config::load_env();

    if let Err(e) = config::ensure_required() {
        error!("Cannot start: {}", e);
    }

    let state = match AppState::from_config() {
        Ok(state) => state,
        Err(e) => error!("Failed to build application state: {}", e),
    };

    info!("Starting dashboard server on {}", config::server_addr());
    server::start_server(state).await;
}
