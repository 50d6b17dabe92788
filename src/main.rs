use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use courtbook::config::AppConfig;
use courtbook::db;
use courtbook::handlers;
use courtbook::services::booking::BookingService;
use courtbook::services::clock::SystemClock;
use courtbook::services::slots::SlotGrid;
use courtbook::services::store::sqlite::SqliteStore;
use courtbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    let grid = SlotGrid::from_config(&config)?;

    let conn = db::init_db(&config.database_url, Duration::from_millis(config.lock_timeout_ms))?;
    let store = Arc::new(SqliteStore::new(Arc::new(Mutex::new(conn))));

    let bookings = BookingService::new(
        store.clone(),
        store.clone(),
        Arc::new(SystemClock),
        grid,
        Duration::from_millis(config.lock_timeout_ms),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        bookings,
        courts: store,
    });

    let sweep_state = state.clone();
    let sweep_every = Duration::from_secs(config.sweep_interval_secs.max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_every);
        loop {
            ticker.tick().await;
            if let Err(e) = sweep_state.bookings.complete_finished_bookings() {
                tracing::error!(error = %e, "completion sweep failed");
            }
        }
    });

    let app = handlers::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
