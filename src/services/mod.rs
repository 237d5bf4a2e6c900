// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod eventboard;
pub mod reservation;
pub mod token;

pub use eventboard::{ApiError, EventboardClient};
pub use reservation::{EmptyOutcome, OccupiedOutcome, ReservationController};
pub use token::TokenManager;
