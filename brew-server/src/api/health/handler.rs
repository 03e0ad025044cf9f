//! Health API Handlers

/// GET /ping - liveness probe
pub async fn ping() -> &'static str {
    "pong"
}
