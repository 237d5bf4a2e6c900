// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth token lifecycle for the single stored credential.

use crate::db::SqliteDb;
use crate::error::AppError;
use crate::models::Credential;
use crate::services::eventboard::EventboardClient;
use crate::time_utils::{format_epoch_rfc3339, now_epoch_secs};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Refresh this many seconds before the access token actually expires.
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Whether the stored access token is inside the refresh window.
///
/// A credential that has never been refreshed counts as refreshed at epoch 0,
/// which forces the first call to refresh.
pub fn needs_refresh(credential: &Credential, now: i64) -> bool {
    let updated_at = credential.updated_at.unwrap_or(0);
    now.saturating_sub(updated_at)
        > credential
            .expires_in
            .saturating_sub(TOKEN_REFRESH_MARGIN_SECS)
}

/// Hands out a currently valid access token, refreshing the stored
/// credential when it is about to expire.
#[derive(Clone)]
pub struct TokenManager {
    client: EventboardClient,
    db: SqliteDb,
    /// Serializes the check-refresh-write sequence across requests.
    refresh_lock: Arc<Mutex<()>>,
}

impl TokenManager {
    pub fn new(client: EventboardClient, db: SqliteDb) -> Self {
        Self {
            client,
            db,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get a valid access token.
    ///
    /// 1. Read the credential; if it is outside the refresh window, return it
    /// 2. Take the refresh lock and re-read (a concurrent request may have won)
    /// 3. Refresh against the authorization endpoint
    /// 4. Persist all four token fields atomically, then return the new token
    ///
    /// A failed refresh writes nothing and is not retried.
    pub async fn get_access_token(&self) -> Result<String, AppError> {
        let credential = self.load_credential().await?;
        if !needs_refresh(&credential, now_epoch_secs()) {
            return Ok(credential.access_token);
        }

        let _guard = self.refresh_lock.lock().await;

        let credential = self.load_credential().await?;
        let now = now_epoch_secs();
        if !needs_refresh(&credential, now) {
            tracing::debug!("Token already refreshed by a concurrent request");
            return Ok(credential.access_token);
        }

        tracing::info!(
            last_refresh = %format_epoch_rfc3339(credential.updated_at.unwrap_or(0)),
            expires_in = credential.expires_in,
            "Access token expiring, refreshing"
        );

        let grant = self.client.refresh_token(&credential).await.map_err(|e| {
            tracing::warn!(error = %e, "Token refresh rejected");
            AppError::TokenRefresh(e.to_string())
        })?;

        self.db.store_refreshed_tokens(&grant, now).await?;

        tracing::info!(expires_in = grant.expires_in, "Token refreshed and stored");
        Ok(grant.access_token)
    }

    async fn load_credential(&self) -> Result<Credential, AppError> {
        self.db
            .get_credential()
            .await?
            .ok_or(AppError::CredentialsMissing)
    }
}
