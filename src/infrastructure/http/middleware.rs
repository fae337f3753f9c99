//! HTTP Middleware
//!
//! HTTP 状态码错误日志中间件

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

/// 超过该耗时的请求记录为慢请求（LLM 调用通常需要数秒）
const SLOW_REQUEST_MS: u128 = 30_000;

/// HTTP 状态码错误日志中间件
///
/// 4xx 记 warn，5xx 记 error；业务错误（errno != 0）在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP client error"
        );
    } else if elapsed_ms >= SLOW_REQUEST_MS {
        tracing::warn!(method = %method, uri = %uri, elapsed_ms = elapsed_ms, "Slow request");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::{get, post},
        Router,
    };
    use tower::util::ServiceExt;

    async fn list_handler() -> &'static str {
        "[]"
    }

    async fn method_not_allowed_target() -> &'static str {
        "generated"
    }

    async fn failing_handler() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/story/list", get(list_handler))
            .route("/story/generate", post(method_not_allowed_target))
            .route("/story/broken", get(failing_handler))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn status_of(method: &str, uri: &str) -> StatusCode {
        let request = HttpRequest::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        create_test_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        assert_eq!(status_of("GET", "/story/list").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_client_errors_pass_through() {
        assert_eq!(status_of("GET", "/story/missing").await, StatusCode::NOT_FOUND);
        assert_eq!(
            status_of("GET", "/story/generate").await,
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[tokio::test]
    async fn test_server_error_passes_through() {
        assert_eq!(
            status_of("GET", "/story/broken").await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
