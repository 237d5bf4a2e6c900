// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite client wrapper with typed credential operations.
//!
//! The store holds a single row. Connections come from a pool and go back to
//! it when each operation finishes, so nothing outlives a request.

use crate::db::{CREDENTIAL_ID, SCHEMA};
use crate::error::AppError;
use crate::models::{Credential, TokenGrant};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const MAX_CONNECTIONS: u32 = 4;

/// SQLite database client.
#[derive(Clone)]
pub struct SqliteDb {
    pool: SqlitePool,
}

impl SqliteDb {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// `:memory:` is accepted and routed to [`SqliteDb::connect_in_memory`].
    pub async fn connect(path: &str) -> Result<Self, AppError> {
        if path == ":memory:" {
            return Self::connect_in_memory().await;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open {}: {}", path, e)))?;

        tracing::info!(path, "Opened SQLite database");
        Ok(Self { pool })
    }

    /// In-memory database for tests and local experiments.
    ///
    /// Every SQLite connection gets its own memory database, so the pool is
    /// pinned to one connection that never expires.
    pub async fn connect_in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Create the credentials table if it does not exist.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    // ─── Credential Operations ───────────────────────────────────

    /// Read the singleton credential, if it has been seeded.
    pub async fn get_credential(&self) -> Result<Option<Credential>, AppError> {
        let credential = sqlx::query_as::<_, Credential>(
            "SELECT client_id, client_secret, refresh_token, access_token, expires_in, update_datetime \
             FROM credentials WHERE id = ?",
        )
        .bind(CREDENTIAL_ID)
        .fetch_optional(&self.pool)
        .await?;
        Ok(credential)
    }

    /// Persist the result of a successful refresh.
    ///
    /// All four mutable columns change in one statement inside one
    /// transaction; readers see either the old row or the new one.
    pub async fn store_refreshed_tokens(
        &self,
        grant: &TokenGrant,
        refreshed_at: i64,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE credentials \
             SET refresh_token = ?, access_token = ?, expires_in = ?, update_datetime = ? \
             WHERE id = ?",
        )
        .bind(&grant.refresh_token)
        .bind(&grant.access_token)
        .bind(grant.expires_in)
        .bind(refreshed_at)
        .bind(CREDENTIAL_ID)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() != 1 {
            // Dropping `tx` rolls back.
            return Err(AppError::CredentialsMissing);
        }

        tx.commit().await?;
        Ok(())
    }

    /// Insert the credential row if absent. Returns whether a row was written.
    ///
    /// An existing row is never touched, so restarting with stale bootstrap
    /// variables cannot roll back a rotated refresh token.
    pub async fn seed_credential(
        &self,
        client_id: &str,
        client_secret: &str,
        refresh_token: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO credentials (id, client_id, client_secret, refresh_token) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(CREDENTIAL_ID)
        .bind(client_id)
        .bind(client_secret)
        .bind(refresh_token)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    /// Overwrite the whole credential row.
    ///
    /// Exists for test fixtures; production code only seeds and refreshes.
    pub async fn set_credential(&self, credential: &Credential) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR REPLACE INTO credentials \
             (id, client_id, client_secret, refresh_token, access_token, expires_in, update_datetime) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(CREDENTIAL_ID)
        .bind(&credential.client_id)
        .bind(&credential.client_secret)
        .bind(&credential.refresh_token)
        .bind(&credential.access_token)
        .bind(credential.expires_in)
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
