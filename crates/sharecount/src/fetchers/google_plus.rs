//! Google+ fetcher
//!
//! Scrapes the +1 fastbutton page, which embeds the counter in an inline
//! script as `window.__SSR = {c: 123.0 ...`.

use super::extract::{capture_count, Capture};
use super::{endpoint, http, CountFetcher};
use crate::client::CountOptions;
use crate::error::CountError;
use crate::types::Provider;
use async_trait::async_trait;
use regex::bytes::Regex;
use std::sync::LazyLock;
use tracing::warn;

const ENDPOINT: &str = "https://plusone.google.com/u/0/_/+1/fastbutton?url={url}&count=true";

static COUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"window\.__SSR\s=\s\{c:\s([0-9]+)\.0").expect("valid regex")
});

/// Google+ share count fetcher
///
/// Lenient: a page without the counter, or with one that does not fit in a
/// count, yields zero rather than an error.
pub struct GooglePlusFetcher;

impl GooglePlusFetcher {
    /// Extract the count from a fastbutton page fetched from `request_url`
    pub fn extract_count(body: &[u8], request_url: &str) -> u64 {
        match capture_count(&COUNT_PATTERN, body, 1) {
            Capture::Count(count) => count,
            Capture::Unparsable => 0,
            Capture::Missing => {
                warn!(
                    provider = %Provider::GooglePlus,
                    pattern = COUNT_PATTERN.as_str(),
                    url = %request_url,
                    "Count pattern not found in response"
                );
                0
            }
        }
    }
}

#[async_trait]
impl CountFetcher for GooglePlusFetcher {
    fn provider(&self) -> Provider {
        Provider::GooglePlus
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
        Ok(Self::extract_count(&body, &request_url))
    }
}
