use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde_json::json;

use super::traits::InquirySink;
use crate::backend::domain::{InquiryError, InquiryRecord};

/// Forwards inquiries to a SheetDB-style spreadsheet API.
///
/// Each submission is a POST of `{"data": <row>}` to the configured URL.
#[derive(Debug, Clone)]
pub struct SheetDbSink {
    client: Client,
    url: Option<String>,
}

impl SheetDbSink {
    /// `url` of `None` makes every submission fail with `NotConfigured`
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait]
impl InquirySink for SheetDbSink {
    async fn submit(&self, record: &InquiryRecord) -> Result<(), InquiryError> {
        let url = self.url.as_deref().ok_or(InquiryError::NotConfigured)?;
        let body = json!({ "data": record });

        debug!("Forwarding inquiry from {} to spreadsheet", record.email_address);

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| InquiryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Spreadsheet submission failed: {} - {}", status, error_text);
            return Err(InquiryError::Upstream(status.to_string()));
        }

        info!("Inquiry from {} recorded", record.email_address);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record() -> InquiryRecord {
        InquiryRecord {
            date_of_enquiry: "03/10/2025, 14:05".to_string(),
            full_name: "Thandi Mokoena".to_string(),
            email_address: "thandi@example.com".to_string(),
            start_date: "March 12, 2025".to_string(),
            phone_number: String::new(),
            group_size: String::new(),
            experience: String::new(),
            message: String::new(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_sink_rejects_submission() {
        let sink = SheetDbSink::new(None);
        let result = sink.submit(&create_test_record()).await;
        assert!(matches!(result, Err(InquiryError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) on localhost is not listening in test environments
        let sink = SheetDbSink::new(Some("http://127.0.0.1:9/api/v1/sheet".to_string()));
        let result = sink.submit(&create_test_record()).await;
        assert!(matches!(result, Err(InquiryError::Transport(_))));
    }
}
