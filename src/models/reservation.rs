// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reservation shapes exchanged with the calendar API.
//!
//! The API is loose about scalar types: ids show up as numbers or strings and
//! timestamps as integers or numeric strings. Decoding normalizes both.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A reservation as returned by the calendar API. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reservation {
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
    #[serde(deserialize_with = "epoch_from_scalar")]
    pub starts_at: i64,
    #[serde(deserialize_with = "epoch_from_scalar")]
    pub ends_at: i64,
    #[serde(default)]
    pub title: Option<String>,
}

impl Reservation {
    /// True if `now` falls inside `[starts_at, ends_at]` (both ends inclusive).
    pub fn is_active_at(&self, now: i64) -> bool {
        self.starts_at <= now && now <= self.ends_at
    }
}

/// `GET /reservations/` response envelope.
#[derive(Debug, Deserialize)]
pub struct ReservationList {
    pub reservations: Vec<Reservation>,
}

/// `POST /reservations/` response envelope.
#[derive(Debug, Deserialize)]
pub struct CreatedReservation {
    pub reservation: CreatedReservationBody,
}

#[derive(Debug, Deserialize)]
pub struct CreatedReservationBody {
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
}

/// `POST /reservations/` request body.
#[derive(Debug, Serialize)]
pub struct NewReservationRequest<'a> {
    pub reservation: NewReservation<'a>,
}

#[derive(Debug, Serialize)]
pub struct NewReservation<'a> {
    pub title: &'a str,
    pub starts_at: i64,
    pub ends_at: i64,
}

/// `PATCH /reservations/{id}` request body.
///
/// The wrapper key is plural on this endpoint.
#[derive(Debug, Serialize)]
pub struct EndReservationRequest {
    pub reservations: EndReservation,
}

#[derive(Debug, Serialize)]
pub struct EndReservation {
    pub ends_at: i64,
}

fn id_from_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("invalid reservation id: {other}"))),
    }
}

fn epoch_from_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {n}"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("invalid timestamp: {s:?}"))),
        other => Err(de::Error::custom(format!("invalid timestamp: {other}"))),
    }
}
