// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared-key check for the occupancy signal endpoints.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Header a sensor uses to present the app secret key.
pub const SENSOR_KEY_HEADER: &str = "x-sensor-key";

/// Require `X-Sensor-Key` to match the configured secret key.
///
/// With no secret key configured every request passes.
pub async fn require_sensor_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = state.config.secret_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let provided = request
        .headers()
        .get(SENSOR_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");

    if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            path = %request.uri().path(),
            key_present = !provided.is_empty(),
            "Blocked signal with invalid sensor key"
        );
        Err(AppError::Unauthorized)
    }
}
