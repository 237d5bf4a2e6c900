// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod credential;
pub mod reservation;

pub use credential::{Credential, TokenGrant};
pub use reservation::Reservation;
