//! # IO Module
//!
//! Interface layer between the site and the domain logic: JSON over HTTP,
//! with domain errors translated into status codes.
//!
//! ## Supported Operations
//!
//! - **/api/calendar/...**: calendar session, navigation, month views, selection
//! - **/api/inquiry**: picked hike date and inquiry submission

pub mod rest;

pub use rest::*;
