//! # Backend Module
//!
//! Contains all non-UI logic for the trail booking service.
//!
//! - **domain**: calendar arithmetic, availability, the date picker widget, inquiries
//! - **storage**: content loading and inquiry delivery
//! - **io**: REST handlers exposing the domain to the site
//! - **config**: environment-driven settings
//!
//! ```text
//! Site (contact form + calendar popup)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (calendar, availability, inquiries)
//!     ↓
//! Storage Layer (content file, spreadsheet API)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{HeaderName, HeaderValue, Method},
    Router,
};
use log::{error, info};
use tower_http::cors::{Any, CorsLayer};

use crate::backend::config::AppConfig;
use crate::backend::domain::{
    resolve_help_info, AvailabilitySource, BookingCalendarService, Clock, InquiryService,
    SessionStore,
};
use crate::backend::io::SESSION_HEADER;
use crate::backend::storage::{ContentRepository, InquirySink, JsonContentRepository, SheetDbSink};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub calendar_service: BookingCalendarService,
    pub inquiry_service: InquiryService,
}

/// Initialize the backend from configuration
pub async fn initialize_backend(config: &AppConfig) -> AppState {
    let content = JsonContentRepository::new(&config.content_path);
    let sink = SheetDbSink::new(config.sheetdb_url.clone());
    initialize_backend_with(config.clock(), config.session_idle_timeout, &content, Arc::new(sink)).await
}

/// Initialize the backend with explicit collaborators.
///
/// Content that cannot be loaded is logged and replaced by defaults, so this
/// never fails.
pub async fn initialize_backend_with(
    clock: Arc<dyn Clock>,
    session_idle_timeout: Duration,
    content: &dyn ContentRepository,
    sink: Arc<dyn InquirySink>,
) -> AppState {
    info!("Loading homepage content");
    let homepage = match content.load_homepage().await {
        Ok(homepage) => homepage,
        Err(e) => {
            error!("Failed to load homepage content, using defaults: {:#}", e);
            None
        }
    };
    let calendar_content = homepage
        .and_then(|homepage| homepage.contact_form)
        .and_then(|contact_form| contact_form.calendar);

    info!("Setting up domain model");
    let help_info = resolve_help_info(calendar_content.as_ref().and_then(|c| c.help_info.as_ref()));
    let sessions = Arc::new(SessionStore::new(
        clock,
        AvailabilitySource::new(calendar_content),
        session_idle_timeout,
    ));

    AppState {
        calendar_service: BookingCalendarService::new(Arc::clone(&sessions), help_info),
        inquiry_service: InquiryService::new(sink, sessions),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origin: HeaderValue) -> Router {
    // CORS setup to allow the site to make requests
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(SESSION_HEADER)]);

    let api_routes = Router::new()
        .nest("/calendar", io::calendar_apis::router())
        .nest("/inquiry", io::inquiry_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}
