//! Outbound HTTP plumbing shared by the network-backed fetchers

use crate::client::CountOptions;
use crate::error::CountError;
use crate::DEFAULT_USER_AGENT;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::debug;

/// Placeholder in endpoint templates replaced by the escaped target URL
pub const URL_PLACEHOLDER: &str = "{url}";

/// Build the provider request URL from a template and the target page URL
///
/// The target is form-encoded as a query-string value: space becomes `+`
/// and everything outside `A-Z a-z 0-9 * - . _` is percent-escaped (`~`
/// included). Providers decode it back to the same target URL.
pub fn request_url(template: &str, target_url: &str) -> String {
    let escaped: String = url::form_urlencoded::byte_serialize(target_url.as_bytes()).collect();
    template.replace(URL_PLACEHOLDER, &escaped)
}

/// GET the request URL and read the whole body, honoring the timeout and size cap
///
/// The response status is not inspected: providers are known to return
/// usable bodies with odd status codes, so extraction decides.
pub async fn get_body(
    provider: &'static str,
    request_url: &str,
    options: &CountOptions,
) -> Result<Bytes, CountError> {
    let mut headers = HeaderMap::new();
    let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(options.timeout)
        .timeout(options.timeout)
        .build()
        .map_err(CountError::ClientBuildError)?;

    debug!(provider, url = %request_url, "Requesting share count");

    let response = client
        .get(request_url)
        .send()
        .await
        .map_err(CountError::from_reqwest)?;

    debug!(provider, status = response.status().as_u16(), "Provider responded");

    let limit = options.max_body_bytes;
    if response.content_length().is_some_and(|len| len > limit as u64) {
        return Err(CountError::BodyTooLarge { limit });
    }

    read_body_capped(response, limit).await
}

/// Read the response body, failing once it grows past `limit` bytes
async fn read_body_capped(response: reqwest::Response, limit: usize) -> Result<Bytes, CountError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(CountError::from_reqwest)?;
        if body.len() + chunk.len() > limit {
            return Err(CountError::BodyTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    Ok(Bytes::from(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_escapes_target() {
        assert_eq!(
            request_url(
                "https://example.com/count?url={url}&x=1",
                "http://no.such.domain.org/foo/bar?baz"
            ),
            "https://example.com/count?url=http%3A%2F%2Fno.such.domain.org%2Ffoo%2Fbar%3Fbaz&x=1"
        );
    }

    #[test]
    fn test_request_url_space_and_ampersand() {
        assert_eq!(
            request_url("https://example.com/?url={url}", "a b&c=d"),
            "https://example.com/?url=a+b%26c%3Dd"
        );
    }

    #[test]
    fn test_request_url_form_encoding_set() {
        assert_eq!(
            request_url("https://example.com/?url={url}", "/~user/*"),
            "https://example.com/?url=%2F%7Euser%2F*"
        );
    }

    #[test]
    fn test_request_url_without_placeholder() {
        assert_eq!(
            request_url("https://example.com/fixed", "http://x"),
            "https://example.com/fixed"
        );
    }
}
