// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (sensor key check, response headers).

pub mod security;
pub mod sensor_auth;

pub use sensor_auth::require_sensor_key;
