//! Database layer (SQLite credential store).

pub mod sqlite;

pub use sqlite::SqliteDb;

/// Primary key of the one and only credential row.
pub const CREDENTIAL_ID: i64 = 1;

/// Schema applied at startup and by `init-db`. Safe to run repeatedly.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS credentials (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    client_id TEXT NOT NULL,
    client_secret TEXT NOT NULL,
    refresh_token TEXT NOT NULL,
    access_token TEXT NOT NULL DEFAULT '',
    expires_in INTEGER NOT NULL DEFAULT 0,
    update_datetime INTEGER
);
";
