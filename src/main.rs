// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Room Sensor Bridge API Server
//!
//! Usage:
//!   room-sensor-bridge            serve the signal endpoints
//!   room-sensor-bridge init-db    create the credential table and exit

use room_sensor_bridge::{config::Config, db::SqliteDb, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;

    let db_path = config.database_path();
    let db = SqliteDb::connect(&db_path).await?;
    db.init_schema().await?;

    match std::env::args().nth(1).as_deref() {
        None | Some("serve") => {}
        Some("init-db") => {
            tracing::info!(path = %db_path, "Initialized the database");
            return Ok(());
        }
        Some(other) => anyhow::bail!("Unknown command: {} (expected 'serve' or 'init-db')", other),
    }

    if let Some(bootstrap) = &config.bootstrap {
        let seeded = db
            .seed_credential(
                &bootstrap.client_id,
                &bootstrap.client_secret,
                &bootstrap.refresh_token,
            )
            .await?;
        if seeded {
            tracing::info!("Seeded credential row from environment");
        }
    }

    if db.get_credential().await?.is_none() {
        tracing::warn!("No stored credentials yet; signals will fail until the row is seeded");
    }

    tracing::info!(
        port = config.port,
        api = %config.api_base_url,
        sensor_key = config.secret_key.is_some(),
        "Starting room sensor bridge"
    );

    // Build shared state
    let port = config.port;
    let state = Arc::new(AppState::new(config, db)?);

    // Build router
    let app = room_sensor_bridge::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("room_sensor_bridge=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
