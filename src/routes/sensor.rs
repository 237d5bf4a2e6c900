// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Occupancy signal routes fired by room sensors.

use crate::error::{AppError, Result};
use crate::services::{EmptyOutcome, OccupiedOutcome};
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Signal routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/occupied", get(occupied))
        .route("/empty", get(empty))
}

/// Query string shared by both signals.
#[derive(Debug, Deserialize, Validate)]
pub struct RoomQuery {
    #[validate(length(min = 1, max = 64))]
    pub room_id: String,
}

fn room_id_from(query: std::result::Result<Query<RoomQuery>, QueryRejection>) -> Result<String> {
    let Query(params) = query
        .map_err(|_| AppError::BadRequest("Missing 'room_id' parameter".to_string()))?;
    params
        .validate()
        .map_err(|_| AppError::BadRequest("Invalid 'room_id' parameter".to_string()))?;
    Ok(params.room_id)
}

/// Room became occupied: book it unless something is already running.
async fn occupied(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<RoomQuery>, QueryRejection>,
) -> Result<String> {
    let room_id = room_id_from(query)?;
    tracing::info!(room_id = %room_id, "Occupied signal received");

    match state.reservations.mark_occupied(&room_id).await? {
        OccupiedOutcome::Booked { reservation_id } => Ok(format!(
            "Request received, room booked with ID {}",
            reservation_id
        )),
        OccupiedOutcome::AlreadyBooked => Ok("Request received, room already booked.".to_string()),
    }
}

/// Room became empty: end the active reservation, if any.
async fn empty(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<RoomQuery>, QueryRejection>,
) -> Result<&'static str> {
    let room_id = room_id_from(query)?;
    tracing::info!(room_id = %room_id, "Empty signal received");

    match state.reservations.mark_empty(&room_id).await? {
        EmptyOutcome::Ended { reservation_id } => {
            tracing::debug!(room_id = %room_id, reservation_id = %reservation_id, "Room released");
        }
        EmptyOutcome::NothingActive => {}
    }

    Ok("Request received")
}
