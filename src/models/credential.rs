//! OAuth credential record kept in the local store.

use serde::Deserialize;

/// The singleton credential row.
///
/// `client_id`/`client_secret` are fixed; the other four fields are replaced
/// together on every successful refresh.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Credential {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub access_token: String,
    /// Validity of `access_token` in seconds at the time it was issued
    pub expires_in: i64,
    /// Epoch seconds of the last successful refresh (None until the first one)
    #[sqlx(rename = "update_datetime")]
    pub updated_at: Option<i64>,
}

/// Token refresh response from the authorization endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}
