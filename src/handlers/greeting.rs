use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use crate::{
    models::combine,
    upstream::fetch_pair,
    AppState,
};

const EMPTY_OBJECT: &str = "{}";

// ── GET / ─────────────────────────────────────────────────────────────────────

/// Always 200. Any upstream failure collapses to `{}`.
pub async fn greet(State(state): State<AppState>) -> Response {
    let body = match fetch_pair(state.endpoint.as_ref()).await {
        Ok((adam, eve)) => {
            let combined = combine(&adam, &eve);
            info!(adam = %combined.adam, eve = %combined.eve, "Combined greetings");
            serde_json::to_string_pretty(&combined).unwrap_or_else(|_| EMPTY_OBJECT.to_string())
        }
        Err(e) => {
            warn!(error = %e, "Upstream fan-out failed; answering with empty object");
            EMPTY_OBJECT.to_string()
        }
    };

    (StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response()
}
