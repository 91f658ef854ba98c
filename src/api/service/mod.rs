pub mod endpoints;
pub mod router;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::finder::HospitalFinder;
use crate::state::AppState;

#[derive(Clone)]
pub struct State {
    pub app: Arc<AppState>,
    pub finder: Arc<HospitalFinder>,
    pub static_root: PathBuf,
}

impl State {
    pub fn new(app: Arc<AppState>, finder: Arc<HospitalFinder>, static_root: PathBuf) -> Self {
        Self {
            app,
            finder,
            static_root,
        }
    }
}

impl axum::extract::FromRef<State> for Arc<AppState> {
    fn from_ref(input: &State) -> Self {
        input.app.clone()
    }
}

impl axum::extract::FromRef<State> for Arc<HospitalFinder> {
    fn from_ref(input: &State) -> Self {
        input.finder.clone()
    }
}

impl axum::extract::FromRef<State> for PathBuf {
    fn from_ref(input: &State) -> Self {
        input.static_root.clone()
    }
}

impl IntoResponse for types::ErrorResponse {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self)).into_response()
    }
}

impl types::ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
