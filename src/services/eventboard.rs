// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar API client for reservations and OAuth token refresh.
//!
//! Handles:
//! - Listing reservations for a room
//! - Creating ad-hoc reservations
//! - Ending a reservation early
//! - Refresh-token grants against the authorization endpoint

use crate::config::Config;
use crate::error::AppError;
use crate::models::reservation::{
    CreatedReservation, EndReservation, EndReservationRequest, NewReservation,
    NewReservationRequest, ReservationList,
};
use crate::models::{Credential, Reservation, TokenGrant};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// Raw failure of a single outbound call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Decode(String),
}

/// Calendar API client.
#[derive(Clone)]
pub struct EventboardClient {
    http: reqwest::Client,
    api_base_url: String,
    token_url: String,
}

impl EventboardClient {
    /// Create a client with an explicit per-request timeout.
    pub fn new(api_base_url: &str, token_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token_url: token_url.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            &config.api_base_url,
            &config.oauth_token_url,
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    /// List reservations for a room, in API order.
    pub async fn list_reservations(
        &self,
        access_token: &str,
        room_id: &str,
    ) -> Result<Vec<Reservation>, ApiError> {
        let url = format!("{}/reservations/", self.api_base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .query(&[("room_id[]", room_id)])
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let list: ReservationList = check_response_json(response).await?;
        Ok(list.reservations)
    }

    /// Create a reservation and return its id.
    pub async fn create_reservation(
        &self,
        access_token: &str,
        room_id: &str,
        title: &str,
        starts_at: i64,
        ends_at: i64,
    ) -> Result<String, ApiError> {
        let url = format!("{}/reservations/", self.api_base_url);

        let body = NewReservationRequest {
            reservation: NewReservation {
                title,
                starts_at,
                ends_at,
            },
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .query(&[("room_id", room_id)])
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let created: CreatedReservation = check_response_json(response).await?;
        Ok(created.reservation.id)
    }

    /// Move a reservation's end to `ends_at`.
    ///
    /// The API answers with the updated reservation; a body that is not JSON
    /// is treated as a failure even on a 2xx status.
    pub async fn end_reservation(
        &self,
        access_token: &str,
        reservation_id: &str,
        ends_at: i64,
    ) -> Result<(), ApiError> {
        let url = format!("{}/reservations/{}", self.api_base_url, reservation_id);

        let body = EndReservationRequest {
            reservations: EndReservation { ends_at },
        };

        let response = self
            .http
            .patch(&url)
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let _updated: serde_json::Value = check_response_json(response).await?;
        Ok(())
    }

    /// Exchange the stored refresh token for a new token pair.
    ///
    /// Only HTTP 200 counts as success.
    pub async fn refresh_token(&self, credential: &Credential) -> Result<TokenGrant, ApiError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", credential.client_id.as_str()),
                ("grant_type", "refresh_token"),
                ("client_secret", credential.client_secret.as_str()),
                ("refresh_token", credential.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(status_error(response).await);
        }

        decode_json(response).await
    }
}

/// Check response and parse JSON body.
async fn check_response_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(status_error(response).await);
    }
    decode_json(response).await
}

async fn decode_json<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

async fn status_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    if status == 429 {
        tracing::warn!("Calendar API rate limit hit (429)");
    }

    ApiError::Status { status, body }
}
