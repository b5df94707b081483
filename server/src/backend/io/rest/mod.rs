//! # REST API Interface Layer
//!
//! One module per resource, each exposing a `router()` that is nested under
//! `/api` by `create_router`. Handlers log the request, call one service
//! method and map the outcome to a status code; no business logic lives here.
//! Calendar state is per visitor, keyed by the `x-session-id` header.

pub mod calendar_apis;
pub mod inquiry_apis;
pub mod session;

pub use session::SESSION_HEADER;
