//! Per-request logging with correlation ids

use std::time::Instant;

use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use log::{Level, debug};
use uuid::Uuid;

pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// Tag the request with a fresh correlation id and log its outcome
pub async fn log_requests(request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    debug!("[{}] {} {} started", correlation_id, method, path);

    let mut response = next.run(request).await;
    let status = response.status();

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }

    log::log!(
        outcome_level(status),
        "[{}] {} {} -> {} in {:?}",
        correlation_id,
        method,
        path,
        status,
        start.elapsed()
    );

    response
}

/// Server failures are errors, the same level the store logs them at
fn outcome_level(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::Error
    } else {
        Level::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_level() {
        assert_eq!(outcome_level(StatusCode::INTERNAL_SERVER_ERROR), Level::Error);
        assert_eq!(outcome_level(StatusCode::NOT_FOUND), Level::Info);
        assert_eq!(outcome_level(StatusCode::OK), Level::Info);
    }
}
