
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use stability_api_proxy::{
    api,
    config,
    stability,
    video,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    config::Config::dotenv_load();
    let config = config::Config::new().expect("Failed to load configuration");
    config::Config::print_env_vars();

    // Create Stability client
    let stability_client = stability::client::StabilityClient::new(
        config.stability_url.clone(),
        config.stability_api_key.clone(),
    );

    let state = Arc::new(api::routes::AppState {
        stability_client,
        public_root: PathBuf::from(config.public_root.clone()),
        poll_policy: video::poller::PollPolicy::default(),
    });

    // Build our application with a route
    let app = api::routes::router(state).layer(CorsLayer::permissive());

    // Run our application with safe parsing
    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 127.0.0.1", host_str);
        std::net::IpAddr::from([127, 0, 0, 1])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_PORT '{}', falling back to 8190", port_str);
        8190
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("listening on {}", socket_address);
    axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
