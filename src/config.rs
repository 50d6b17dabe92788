use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub admin_token: String,
    pub open_time: String,
    pub close_time: String,
    pub slot_minutes: u32,
    pub peak_windows: String,
    pub lock_timeout_ms: u64,
    pub sweep_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "courtbook.db".to_string()),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            open_time: env::var("OPEN_TIME").unwrap_or_else(|_| "06:00".to_string()),
            close_time: env::var("CLOSE_TIME").unwrap_or_else(|_| "22:00".to_string()),
            slot_minutes: env::var("SLOT_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            peak_windows: env::var("PEAK_WINDOWS")
                .unwrap_or_else(|_| "17:00-19:00,20:00-22:00".to_string()),
            lock_timeout_ms: env::var("LOCK_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2000),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }
}
