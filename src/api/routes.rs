//! Shared application state and router construction.
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::api::handlers;
use crate::stability::client::StabilityClient;
use crate::video::poller::PollPolicy;

pub struct AppState {
    pub stability_client: StabilityClient,
    /// Directory under which all generated artifacts are stored; relative
    /// paths in responses are computed against it.
    pub public_root: PathBuf,
    pub poll_policy: PollPolicy,
}

/// Build the application router. Used by the binary and by the integration
/// tests so both exercise the same routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/generate_images", post(handlers::generate_images))
        .route("/process_images", post(handlers::process_images))
        .with_state(state)
}
