use std::time::Instant;

use tracing::debug;

use super::Upstream;
use crate::error::{AppError, AppResult};
use crate::models::UpstreamResponse;

pub const ADAM_PATH: &str = "/Adam";
pub const EVE_PATH: &str = "/Eve";

/// Issues `/Adam` and `/Eve` together and waits for both to settle.
///
/// A failure on one side does not cut the other short; the pair is only
/// returned when both calls succeeded. A fast failure therefore still waits
/// for the other call, up to the client timeout, before the caller sees it.
pub async fn fetch_pair(
    upstream: &dyn Upstream,
) -> AppResult<(UpstreamResponse, UpstreamResponse)> {
    let start = Instant::now();
    let (adam, eve) = tokio::join!(
        fetch_greeting(upstream, ADAM_PATH),
        fetch_greeting(upstream, EVE_PATH),
    );

    debug!(
        elapsed_ms = start.elapsed().as_millis(),
        adam_ok = adam.is_ok(),
        eve_ok = eve.is_ok(),
        "Fan-out complete"
    );

    Ok((adam?, eve?))
}

async fn fetch_greeting(upstream: &dyn Upstream, path: &str) -> AppResult<UpstreamResponse> {
    let body = upstream.get_json(path).await?;
    serde_json::from_value(body).map_err(|e| AppError::MalformedBody {
        path: path.to_string(),
        reason: e.to_string(),
    })
}
