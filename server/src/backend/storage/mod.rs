//! # Storage Module
//!
//! Everything that crosses the process boundary on the data side: reading
//! content-managed homepage data and delivering booking inquiries.
//!
//! - **traits**: `ContentRepository` and `InquirySink` abstractions
//! - **json_content**: homepage content from an exported JSON file
//! - **sheetdb**: inquiries forwarded to a spreadsheet HTTP API

pub mod traits;
pub mod json_content;
pub mod sheetdb;

pub use traits::{ContentRepository, InquirySink};
pub use json_content::JsonContentRepository;
pub use sheetdb::SheetDbSink;
