//! Configured share counter and its builder

use crate::client::{fetch_count_with_options, CountOptions};
use crate::error::CountError;
use crate::types::{Provider, ShareCountResponse};
use schemars::schema_for;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Builder for configuring a [`ShareCounter`]
#[derive(Debug, Clone, Default)]
pub struct ShareCounterBuilder {
    options: CountOptions,
}

impl ShareCounterBuilder {
    /// Create a new builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom User-Agent
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.options.user_agent = Some(ua.into());
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Set the maximum accepted response body size
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.options.max_body_bytes = limit;
        self
    }

    /// Point `provider` at a different endpoint template (`{url}` placeholder)
    pub fn endpoint(mut self, provider: Provider, template: impl Into<String>) -> Self {
        self.options.endpoints.set(provider, template);
        self
    }

    /// Build the counter
    pub fn build(self) -> ShareCounter {
        ShareCounter {
            options: Arc::new(self.options),
        }
    }
}

/// Configured share counter
///
/// Clones share one set of options, so a counter can be handed to every
/// concurrent request.
#[derive(Debug, Clone, Default)]
pub struct ShareCounter {
    options: Arc<CountOptions>,
}

impl ShareCounter {
    /// Create a new builder
    pub fn builder() -> ShareCounterBuilder {
        ShareCounterBuilder::new()
    }

    /// Options applied to every request
    pub fn options(&self) -> &CountOptions {
        &self.options
    }

    /// Get output schema as JSON
    pub fn output_schema(&self) -> serde_json::Value {
        let schema = schema_for!(ShareCountResponse);
        serde_json::to_value(schema).unwrap_or_default()
    }

    /// Fetch the share count of `url` from `provider`
    pub async fn count(
        &self,
        provider: Provider,
        url: &str,
    ) -> Result<ShareCountResponse, CountError> {
        let count = fetch_count_with_options(provider, url, &self.options).await?;
        Ok(ShareCountResponse::new(url, count))
    }

    /// Fetch by provider identifier
    ///
    /// Unknown identifiers are not an error: they answer a zero count.
    pub async fn count_by_id(
        &self,
        provider_id: &str,
        url: &str,
    ) -> Result<ShareCountResponse, CountError> {
        match provider_id.parse::<Provider>() {
            Ok(provider) => self.count(provider, url).await,
            Err(_) => {
                debug!(provider = provider_id, "Unknown provider, answering zero");
                Ok(ShareCountResponse::new(url, 0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_options() {
        let counter = ShareCounter::builder()
            .user_agent("test-agent/1.0")
            .timeout(Duration::from_secs(3))
            .max_body_bytes(512)
            .endpoint(Provider::Vkontakte, "http://localhost/vk?u={url}")
            .build();

        let options = counter.options();
        assert_eq!(options.user_agent.as_deref(), Some("test-agent/1.0"));
        assert_eq!(options.timeout, Duration::from_secs(3));
        assert_eq!(options.max_body_bytes, 512);
        assert_eq!(
            options.endpoints.template(Provider::Vkontakte),
            Some("http://localhost/vk?u={url}")
        );
    }

    #[test]
    fn test_clones_share_options() {
        let counter = ShareCounter::builder()
            .endpoint(Provider::Pinterest, "http://localhost/pin?u={url}")
            .build();
        let clone = counter.clone();
        assert!(Arc::ptr_eq(&counter.options, &clone.options));
        assert!(std::ptr::eq(counter.options(), clone.options()));
    }

    #[test]
    fn test_output_schema() {
        let schema = ShareCounter::default().output_schema();
        let props = schema.get("properties").unwrap();
        assert!(props.get("url").is_some());
        assert!(props.get("count").is_some());
    }

    #[tokio::test]
    async fn test_unknown_provider_is_zero() {
        let resp = ShareCounter::default()
            .count_by_id("myspace", "http://example.com")
            .await
            .unwrap();
        assert_eq!(resp, ShareCountResponse::new("http://example.com", 0));
    }

    #[tokio::test]
    async fn test_count_echoes_url() {
        let resp = ShareCounter::default()
            .count_by_id("reddit", "http://example.com/a b")
            .await
            .unwrap();
        assert_eq!(resp.url, "http://example.com/a b");
        assert_eq!(resp.count, 0);
    }
}
