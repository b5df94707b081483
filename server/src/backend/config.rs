//! Runtime configuration, read from `TRAIL_BOOKING_*` environment variables.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use axum::http::HeaderValue;
use log::info;
use shared::CalendarDate;

use crate::backend::domain::{Clock, FixedClock, SystemClock, DEFAULT_IDLE_TIMEOUT};

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CONTENT_PATH: &str = "content/homepage.json";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    pub content_path: PathBuf,
    /// Spreadsheet endpoint for inquiries; submissions fail without it
    pub sheetdb_url: Option<String>,
    /// Pins the calendar's "today"; the local date is used when unset
    pub fixed_today: Option<CalendarDate>,
    /// How long an untouched calendar session is kept
    pub session_idle_timeout: Duration,
    pub cors_origin: HeaderValue,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let addr = get("TRAIL_BOOKING_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("TRAIL_BOOKING_ADDR must be a socket address like 127.0.0.1:3000")?;

        let content_path = get("TRAIL_BOOKING_CONTENT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_PATH));

        let fixed_today = match get("TRAIL_BOOKING_TODAY") {
            Some(raw) => {
                let today = CalendarDate::parse(&raw)
                    .ok_or_else(|| anyhow!("TRAIL_BOOKING_TODAY must be YYYY-MM-DD, got '{}'", raw))?;
                info!("Using TRAIL_BOOKING_TODAY override: {}", today);
                Some(today)
            }
            None => None,
        };

        let session_idle_timeout = match get("TRAIL_BOOKING_SESSION_IDLE_SECS") {
            Some(raw) => Duration::from_secs(raw.parse::<u64>().with_context(|| {
                format!("TRAIL_BOOKING_SESSION_IDLE_SECS must be a number of seconds, got '{}'", raw)
            })?),
            None => DEFAULT_IDLE_TIMEOUT,
        };

        let cors_origin = get("TRAIL_BOOKING_CORS_ORIGIN")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(&cors_origin)
            .with_context(|| format!("Invalid TRAIL_BOOKING_CORS_ORIGIN '{}'", cors_origin))?;

        Ok(Self {
            addr,
            content_path,
            sheetdb_url: get("TRAIL_BOOKING_SHEETDB_URL"),
            fixed_today,
            session_idle_timeout,
            cors_origin,
        })
    }

    /// The calendar's clock: pinned by `TRAIL_BOOKING_TODAY`, otherwise the
    /// local date on every read
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.fixed_today {
            Some(today) => Arc::new(FixedClock(today)),
            None => Arc::new(SystemClock),
        }
    }
}
