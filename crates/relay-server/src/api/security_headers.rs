//! Security headers middleware

use axum::{
    middleware::Next,
    response::Response,
    http::{Request, header, HeaderValue},
};

/// Add security headers to all responses
pub async fn security_headers_middleware(
    request: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    // The dashboard URL carries the shared secret
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer")
    );

    headers.insert(
        header::X_FRAME_OPTIONS,
        HeaderValue::from_static("DENY")
    );

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff")
    );

    // Dashboard glyphs are colored with inline style attributes
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(
            "default-src 'none'; \
             style-src 'unsafe-inline'; \
             frame-ancestors 'none'; \
             form-action 'none'; \
             base-uri 'none'"
        )
    );

    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store")
    );

    response
}
