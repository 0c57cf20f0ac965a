//! StumbleUpon fetcher
//!
//! Reads `result.views` from the badge API. A missing `result` is an error,
//! a missing `views` inside it is a zero count.

use super::extract::{field, floor_count, padded_object};
use super::{endpoint, http, CountFetcher};
use crate::client::CountOptions;
use crate::error::CountError;
use crate::types::Provider;
use async_trait::async_trait;
use tracing::warn;

const ENDPOINT: &str = "https://www.stumbleupon.com/services/1.01/badge.getinfo?url={url}";

/// StumbleUpon share count fetcher
pub struct StumbleUponFetcher;

impl StumbleUponFetcher {
    /// Extract the view count from a badge API response
    pub fn extract_count(body: &[u8]) -> Result<u64, CountError> {
        let provider = Provider::StumbleUpon.id();
        let response = padded_object(provider, body, 0, 0)?;

        let Some(result) = field(&response, "result") else {
            warn!(provider, "Bad response: result is empty");
            return Err(CountError::bad_response(provider, "result is empty"));
        };

        let result = result
            .as_object()
            .ok_or_else(|| CountError::decode(provider, "result is not an object"))?;

        match field(result, "views") {
            Some(views) => floor_count(provider, "result.views", views),
            None => Ok(0),
        }
    }
}

#[async_trait]
impl CountFetcher for StumbleUponFetcher {
    fn provider(&self) -> Provider {
        Provider::StumbleUpon
    }

    fn default_template(&self) -> Option<&'static str> {
        Some(ENDPOINT)
    }

    async fn fetch_count(
        &self,
        target_url: &str,
        options: &CountOptions,
    ) -> Result<u64, CountError> {
        let request_url = http::request_url(endpoint(options, self.provider())?, target_url);
        let body = http::get_body(self.provider().id(), &request_url, options).await?;
        Self::extract_count(&body)
    }
}
