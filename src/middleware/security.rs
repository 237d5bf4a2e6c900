// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Response headers middleware.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};

/// Add hardening headers to all responses.
///
/// Signal endpoints are GETs that change remote state, so no intermediary
/// may cache or replay their responses.
pub async fn add_security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        "X-Content-Type-Options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert("Cache-Control", HeaderValue::from_static("no-store"));

    response
}
