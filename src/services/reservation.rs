// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reconciles sensor-reported occupancy with the room's reservations.

use crate::config::Config;
use crate::error::AppError;
use crate::models::Reservation;
use crate::services::eventboard::EventboardClient;
use crate::services::token::TokenManager;
use crate::time_utils::now_epoch_secs;

/// The first reservation (in API order) whose interval contains `now`.
///
/// Only one active reservation per room is expected. When several overlap,
/// the first one wins and the rest are ignored.
pub fn find_active(reservations: &[Reservation], now: i64) -> Option<&Reservation> {
    reservations.iter().find(|r| r.is_active_at(now))
}

/// Result of an "occupied" signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OccupiedOutcome {
    /// A new ad-hoc reservation was created.
    Booked { reservation_id: String },
    /// The room already had an active reservation; nothing was sent.
    AlreadyBooked,
}

/// Result of an "empty" signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyOutcome {
    /// The active reservation was cut short.
    Ended { reservation_id: String },
    /// No reservation was active. Not an error.
    NothingActive,
}

/// Books and releases rooms in response to occupancy signals.
#[derive(Clone)]
pub struct ReservationController {
    client: EventboardClient,
    tokens: TokenManager,
    adhoc_title: String,
    adhoc_duration: i64,
}

impl ReservationController {
    pub fn new(
        client: EventboardClient,
        tokens: TokenManager,
        adhoc_title: String,
        adhoc_duration: i64,
    ) -> Self {
        Self {
            client,
            tokens,
            adhoc_title,
            adhoc_duration,
        }
    }

    pub fn from_config(client: EventboardClient, tokens: TokenManager, config: &Config) -> Self {
        Self::new(
            client,
            tokens,
            config.adhoc_event_title.clone(),
            config.adhoc_meeting_duration,
        )
    }

    /// Reservations for a room, exactly as the API ordered them.
    pub async fn list_reservations(&self, room_id: &str) -> Result<Vec<Reservation>, AppError> {
        let access_token = self.tokens.get_access_token().await?;
        self.client
            .list_reservations(&access_token, room_id)
            .await
            .map_err(|e| AppError::remote(room_id, "list_reservations", e))
    }

    /// Whether any reservation for the room covers the current second.
    pub async fn is_occupied(&self, room_id: &str) -> Result<bool, AppError> {
        let reservations = self.list_reservations(room_id).await?;
        Ok(find_active(&reservations, now_epoch_secs()).is_some())
    }

    /// Book the room for `[now, now + duration]` unless it is already booked.
    pub async fn mark_occupied(&self, room_id: &str) -> Result<OccupiedOutcome, AppError> {
        if self.is_occupied(room_id).await? {
            tracing::info!(room_id, "Room already booked, no action");
            return Ok(OccupiedOutcome::AlreadyBooked);
        }

        let access_token = self.tokens.get_access_token().await?;
        let now = now_epoch_secs();

        let reservation_id = self
            .client
            .create_reservation(
                &access_token,
                room_id,
                &self.adhoc_title,
                now,
                now + self.adhoc_duration,
            )
            .await
            .map_err(|e| AppError::remote(room_id, "create_reservation", e))?;

        tracing::info!(
            room_id,
            reservation_id = %reservation_id,
            duration_secs = self.adhoc_duration,
            "Ad-hoc reservation created"
        );

        Ok(OccupiedOutcome::Booked { reservation_id })
    }

    /// End the room's active reservation now, if there is one.
    pub async fn mark_empty(&self, room_id: &str) -> Result<EmptyOutcome, AppError> {
        let reservations = self.list_reservations(room_id).await?;
        let now = now_epoch_secs();

        let Some(active) = find_active(&reservations, now) else {
            tracing::info!(room_id, "No active reservation to end");
            return Ok(EmptyOutcome::NothingActive);
        };

        let access_token = self.tokens.get_access_token().await?;
        self.client
            .end_reservation(&access_token, &active.id, now)
            .await
            .map_err(|e| AppError::remote(room_id, "end_reservation", e))?;

        tracing::info!(room_id, reservation_id = %active.id, "Reservation ended early");

        Ok(EmptyOutcome::Ended {
            reservation_id: active.id.clone(),
        })
    }
}
