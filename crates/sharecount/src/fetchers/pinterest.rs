//! Pinterest fetcher
//!
//! The count API only answers JSONP; the endpoint asks for callback `a`, so
//! the body is `a(` + JSON + `)` and is trimmed before decoding.

use super::extract::{field, floor_count, padded_object};
use super::{endpoint, http, CountFetcher};
use crate::client::CountOptions;
use crate::error::CountError;
use crate::types::Provider;
use async_trait::async_trait;
use tracing::warn;

const ENDPOINT: &str = "https://api.pinterest.com/v1/urls/count.json?url={url}&callback=a";

/// Bytes of callback padding before the JSON payload: `a(`
const SKIP_FRONT: usize = 2;

/// Bytes of callback padding after the JSON payload: `)`
const SKIP_END: usize = 1;

/// Pinterest share count fetcher
pub struct PinterestFetcher;

impl PinterestFetcher {
    /// Extract the pin count from a JSONP response
    pub fn extract_count(body: &[u8]) -> Result<u64, CountError> {
        let provider = Provider::Pinterest.id();
        let response = padded_object(provider, body, SKIP_FRONT, SKIP_END)?;

        match field(&response, "count") {
            Some(count) => floor_count(provider, "count", count),
            None => {
                warn!(provider, "Bad response: count is empty");
                Err(CountError::bad_response(provider, "count is empty"))
            }
        }
    }
}

#[async_trait]
impl CountFetcher for PinterestFetcher {
    fn provider(&self) -> Provider {
        Provider::Pinterest
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_count() {
        assert_eq!(
            PinterestFetcher::extract_count(br#"a({"count": 42})"#).unwrap(),
            42
        );
        assert_eq!(
            PinterestFetcher::extract_count(br#"a({"url":"http://www.stopfake.org","count":17.9})"#)
                .unwrap(),
            17
        );
    }

    #[test]
    fn test_missing_count_is_bad_response() {
        let err = PinterestFetcher::extract_count(b"a({})").unwrap_err();
        assert!(matches!(
            err,
            CountError::BadResponse {
                provider: "pinterest",
                ..
            }
        ));
        assert_eq!(err.to_string(), "pinterest: bad response: count is empty");
    }

    #[test]
    fn test_unwrapped_json_fails_to_decode() {
        // Trimming an unpadded body cuts into the JSON itself
        let err = PinterestFetcher::extract_count(br#"{"count": 42}"#).unwrap_err();
        assert!(matches!(err, CountError::Decode { .. }));
    }

    #[test]
    fn test_truncated_body_fails_to_decode() {
        let bodies: [&[u8]; 3] = [b"", b"a", b"a("];
        for body in bodies {
            let err = PinterestFetcher::extract_count(body).unwrap_err();
            assert!(matches!(err, CountError::Decode { .. }), "{:?}", err);
        }
    }
}
