//! Application configuration loaded from environment variables.
//!
//! Everything here is fixed at deployment. The struct is built once at
//! startup and shared read-only through `AppState`.

use std::env;
use std::str::FromStr;

/// Calendar API base used when `API_BASE_URL` is unset.
pub const DEFAULT_API_BASE_URL: &str = "https://eventboard.io/api/v4/calendars";
/// OAuth token endpoint used when `OAUTH_TOKEN_URL` is unset.
pub const DEFAULT_OAUTH_TOKEN_URL: &str = "https://eventboard.io/oauth/token/";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Directory holding the SQLite file (may be empty for the working dir)
    pub database_location: String,
    /// SQLite file name
    pub database_name: String,
    /// Title given to reservations created by an occupancy signal
    pub adhoc_event_title: String,
    /// Length of an ad-hoc reservation in seconds
    pub adhoc_meeting_duration: i64,
    /// Base URL for `/reservations/` calls
    pub api_base_url: String,
    /// OAuth refresh endpoint
    pub oauth_token_url: String,
    /// Timeout applied to every outbound HTTP call
    pub http_timeout_secs: u64,
    /// App secret key. When set, sensors must send it as `X-Sensor-Key`.
    pub secret_key: Option<String>,
    /// Credential used to seed an empty store
    pub bootstrap: Option<BootstrapCredential>,
}

/// Initial OAuth identity and refresh token for a fresh database.
#[derive(Debug, Clone)]
pub struct BootstrapCredential {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

impl Default for Config {
    /// Default config for testing only.
    ///
    /// No sensor key, no bootstrap, and outbound URLs that refuse connections.
    fn default() -> Self {
        Self {
            port: 8080,
            database_location: String::new(),
            database_name: ":memory:".to_string(),
            adhoc_event_title: "Quick Adhoc Reservation".to_string(),
            adhoc_meeting_duration: 1800,
            api_base_url: "http://127.0.0.1:9/api/v4/calendars".to_string(),
            oauth_token_url: "http://127.0.0.1:9/oauth/token/".to_string(),
            http_timeout_secs: 5,
            secret_key: None,
            bootstrap: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let adhoc_meeting_duration: i64 = parse_var("ADHOC_MEETING_DURATION", 1800)?;
        if adhoc_meeting_duration <= 0 {
            return Err(ConfigError::Invalid("ADHOC_MEETING_DURATION"));
        }

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            database_location: env::var("DATABASE_LOCATION").unwrap_or_default(),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "eb_sensor_app.db".to_string()),
            adhoc_event_title: env::var("ADHOC_EVENT_TITLE")
                .unwrap_or_else(|_| "Quick Adhoc Reservation".to_string()),
            adhoc_meeting_duration,
            api_base_url: env::var("API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            oauth_token_url: env::var("OAUTH_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_OAUTH_TOKEN_URL.to_string()),
            http_timeout_secs: parse_var("HTTP_TIMEOUT_SECS", 10)?,
            secret_key: env::var("SECRET_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            bootstrap: bootstrap_from_env(),
        })
    }

    /// Full path of the SQLite file (location + name, as configured).
    pub fn database_path(&self) -> String {
        format!("{}{}", self.database_location, self.database_name)
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(default),
    }
}

/// Bootstrap is all-or-nothing: a partial set is ignored with a warning.
fn bootstrap_from_env() -> Option<BootstrapCredential> {
    let client_id = env::var("EVENTBOARD_CLIENT_ID").ok();
    let client_secret = env::var("EVENTBOARD_CLIENT_SECRET").ok();
    let refresh_token = env::var("EVENTBOARD_REFRESH_TOKEN").ok();

    match (client_id, client_secret, refresh_token) {
        (Some(client_id), Some(client_secret), Some(refresh_token)) => Some(BootstrapCredential {
            client_id: client_id.trim().to_string(),
            client_secret: client_secret.trim().to_string(),
            refresh_token: refresh_token.trim().to_string(),
        }),
        (None, None, None) => None,
        _ => {
            tracing::warn!("Incomplete EVENTBOARD_* bootstrap credentials, ignoring");
            None
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("ADHOC_MEETING_DURATION", "900");
        env::set_var("API_BASE_URL", "https://calendar.example.com/api/");
        env::set_var("SECRET_KEY", "  sensor-key ");
        env::remove_var("EVENTBOARD_CLIENT_ID");
        env::remove_var("EVENTBOARD_CLIENT_SECRET");
        env::remove_var("EVENTBOARD_REFRESH_TOKEN");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.adhoc_meeting_duration, 900);
        assert_eq!(config.api_base_url, "https://calendar.example.com/api");
        assert_eq!(config.secret_key.as_deref(), Some("sensor-key"));
        assert!(config.bootstrap.is_none());

        // Env vars are process-wide, so the rejection cases live in this test too.
        for bad in ["0", "-5", "half an hour"] {
            env::set_var("ADHOC_MEETING_DURATION", bad);
            assert!(matches!(
                Config::from_env(),
                Err(ConfigError::Invalid("ADHOC_MEETING_DURATION"))
            ));
        }

        env::remove_var("ADHOC_MEETING_DURATION");
        env::remove_var("API_BASE_URL");
        env::remove_var("SECRET_KEY");
    }

    #[test]
    fn test_database_path_joins_location_and_name() {
        let config = Config {
            database_location: "/var/lib/sensor/".to_string(),
            database_name: "eb_sensor_app.db".to_string(),
            ..Config::default()
        };
        assert_eq!(config.database_path(), "/var/lib/sensor/eb_sensor_app.db");
    }

    #[test]
    fn test_default_is_inert() {
        let config = Config::default();
        assert_eq!(config.database_path(), ":memory:");
        assert!(config.secret_key.is_none());
        assert!(config.bootstrap.is_none());
        assert!(config.api_base_url.starts_with("http://127.0.0.1:9/"));
        assert!(config.oauth_token_url.starts_with("http://127.0.0.1:9/"));
    }
}
