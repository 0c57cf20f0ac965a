//! VKontakte fetcher
//!
//! The share counter endpoint answers with a JS callback,
//! `VK.Share.count(<index>, <count>);`. Unlike Google+, a response without
//! that callback is reported as an error.

use super::extract::{capture_count, Capture};
use super::{endpoint, http, CountFetcher};
use crate::client::CountOptions;
use crate::error::CountError;
use crate::types::Provider;
use async_trait::async_trait;
use regex::bytes::Regex;
use std::sync::LazyLock;
use tracing::warn;

const ENDPOINT: &str = "https://vk.com/share.php?act=count&index=0&url={url}";

static COUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"VK\.Share\.count\(([0-9]+), ([0-9]+)\);").expect("valid regex")
});

/// VKontakte share count fetcher
pub struct VkontakteFetcher;

impl VkontakteFetcher {
    /// Extract the count (second callback argument) from a counter response
    /// fetched from `request_url`
    pub fn extract_count(body: &[u8], request_url: &str) -> Result<u64, CountError> {
        let provider = Provider::Vkontakte.id();
        match capture_count(&COUNT_PATTERN, body, 2) {
            Capture::Count(count) => Ok(count),
            Capture::Unparsable => Err(CountError::decode(
                provider,
                "count does not fit in 64 bits",
            )),
            Capture::Missing => {
                warn!(
                    provider,
                    pattern = COUNT_PATTERN.as_str(),
                    url = %request_url,
                    "Count pattern not found in response"
                );
                Err(CountError::bad_response(
                    provider,
                    format!("pattern {} not found", COUNT_PATTERN.as_str()),
                ))
            }
        }
    }
}

#[async_trait]
impl CountFetcher for VkontakteFetcher {
    fn provider(&self) -> Provider {
        Provider::Vkontakte
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
        Self::extract_count(&body, &request_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::capture_logs;

    const REQUEST_URL: &str = "https://vk.com/share.php?act=count&index=0&url=http%3A%2F%2Fexample.com";

    #[test]
    fn test_extract_count() {
        let body = b"VK.Share.count(0, 973);";
        assert_eq!(VkontakteFetcher::extract_count(body, REQUEST_URL).unwrap(), 973);
    }

    #[test]
    fn test_extract_count_uses_second_argument() {
        let body = b"/* counter */ VK.Share.count(7, 0);";
        assert_eq!(VkontakteFetcher::extract_count(body, REQUEST_URL).unwrap(), 0);
    }

    #[test]
    fn test_missing_pattern_is_bad_response() {
        let err = VkontakteFetcher::extract_count(b"<html>captcha</html>", REQUEST_URL).unwrap_err();
        assert!(matches!(
            err,
            CountError::BadResponse {
                provider: "vkontakte",
                ..
            }
        ));

        // Missing trailing semicolon does not match
        assert!(VkontakteFetcher::extract_count(b"VK.Share.count(0, 5)", REQUEST_URL).is_err());
    }

    #[test]
    fn test_missing_pattern_warns_with_request_url() {
        let logs = capture_logs(|| {
            assert!(VkontakteFetcher::extract_count(b"<html></html>", REQUEST_URL).is_err());
        });
        assert!(logs.contains("WARN"), "{}", logs);
        assert!(logs.contains("Count pattern not found"), "{}", logs);
        assert!(logs.contains(REQUEST_URL), "{}", logs);
    }

    #[test]
    fn test_overflowing_count_is_decode_error() {
        let body = b"VK.Share.count(0, 123456789012345678901234567890);";
        let err = VkontakteFetcher::extract_count(body, REQUEST_URL).unwrap_err();
        assert!(matches!(err, CountError::Decode { .. }));
    }
}
