use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags each request with a short id and logs its start and completion.
/// A caller-supplied `x-request-id` is kept as is.
pub async fn logging_middleware(mut request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let request_id = match request.headers().get(REQUEST_ID_HEADER) {
        Some(existing) => existing.to_str().unwrap_or_default().to_string(),
        None => {
            let generated = Uuid::new_v4().to_string()[..8].to_string();
            if let Ok(value) = HeaderValue::from_str(&generated) {
                request.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            generated
        }
    };

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        "Request started"
    );

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = %start.elapsed().as_millis(),
        "Request completed"
    );

    response
}

/// Request id assigned by `logging_middleware`, or `-` outside of it.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string()
}
