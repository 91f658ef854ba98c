use axum::routing::{get, post};

use super::endpoints;
use crate::static_files;

pub fn router(state: super::State) -> axum::Router {
    axum::Router::new()
        .route("/api/hospitals", get(endpoints::get_hospitals))
        .route("/api/location", post(endpoints::update_location))
        .route("/api/emergency", post(endpoints::start_emergency))
        .route("/api/sos", post(endpoints::trigger_sos))
        .route("/api/status", get(endpoints::get_status))
        .fallback(static_files::asset)
        .with_state(state)
}
