// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Room sensor bridge: books and releases meeting rooms from occupancy signals.
//!
//! A sensor hits `/occupied` or `/empty`; the service checks the room's
//! reservations on the calendar API and creates or ends one as needed,
//! keeping the OAuth credential in a local SQLite store fresh along the way.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SqliteDb;
use error::AppError;
use services::{EventboardClient, ReservationController, TokenManager};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SqliteDb,
    pub tokens: TokenManager,
    pub reservations: ReservationController,
}

impl AppState {
    /// Wire the services together over an already-initialized database.
    pub fn new(config: Config, db: SqliteDb) -> Result<Self, AppError> {
        let client = EventboardClient::from_config(&config)?;
        let tokens = TokenManager::new(client.clone(), db.clone());
        let reservations = ReservationController::from_config(client, tokens.clone(), &config);

        Ok(Self {
            config,
            db,
            tokens,
            reservations,
        })
    }
}
