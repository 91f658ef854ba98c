use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

/// Serves the web app's files from the configured root. `/` maps to the
/// index document; anything the root does not contain is a plain-text 404.
pub async fn asset(State(root): State<PathBuf>, uri: Uri) -> Response {
    let relative = uri.path().trim_start_matches('/');
    let file = if relative.is_empty() {
        root.join("index.html")
    } else {
        root.join(relative)
    };

    match tokio::fs::read(&file).await {
        Ok(content) => ([(header::CONTENT_TYPE, content_type(&file))], content).into_response(),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, "404 Not Found").into_response()
        }
        Err(e) => {
            log::warn!("failed to read {}: {e}", file.display());
            (StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error").into_response()
        }
    }
}

pub fn content_type(file: &Path) -> &'static str {
    let extension = file.extension().and_then(|e| e.to_str()).unwrap_or("");

    match extension {
        "js" => "text/javascript",
        "css" => "text/css",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" => "image/jpg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        _ => "text/html",
    }
}
