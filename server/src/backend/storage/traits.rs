//! # Storage Traits
//!
//! Abstractions over where homepage content comes from and where booking
//! inquiries go, so the domain layer can be tested without files or network.

use anyhow::Result;
use async_trait::async_trait;
use shared::HomepageContent;

use crate::backend::domain::{InquiryError, InquiryRecord};

/// Source of content-managed homepage data
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Load the homepage content.
    /// Returns `Ok(None)` when no content has been published yet.
    async fn load_homepage(&self) -> Result<Option<HomepageContent>>;
}

/// Destination for submitted booking inquiries
#[async_trait]
pub trait InquirySink: Send + Sync {
    /// Deliver one inquiry row
    async fn submit(&self, record: &InquiryRecord) -> Result<(), InquiryError>;
}
