use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Логирует каждый запрос: метод, путь, статус и длительность.
///
/// Reuses an incoming `x-request-id` or generates one, and echoes it on the
/// response.
pub async fn log_requests(mut request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .cloned()
        .unwrap_or_else(|| {
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
        });
    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, request_id.clone());

    tracing::info!(
        %method,
        path = %path,
        request_id = ?request_id,
        "HTTP request"
    );

    let mut response = next.run(request).await;

    tracing::info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = ?request_id,
        "HTTP response"
    );

    response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    response
}
