use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use log::info;

/// Logs method, path, status and latency for every request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        "event=http_request module=http status={} method={method} path={path} duration_ms={}",
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}
