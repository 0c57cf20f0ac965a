//! Entry points for fetching share counts
//!
//! Per-provider logic lives in the [`fetchers`](crate::fetchers) module.

use crate::error::CountError;
use crate::types::Provider;
use std::collections::HashMap;
use std::time::Duration;

/// Default timeout for a single provider request (connect + full body)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default cap on a provider response body
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Endpoint templates per provider
///
/// Templates carry a single `{url}` placeholder that receives the escaped
/// target URL. Defaults point at the production endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    templates: HashMap<Provider, String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        let templates = Provider::ALL
            .into_iter()
            .filter_map(|p| {
                p.fetcher()
                    .default_template()
                    .map(|t| (p, t.to_string()))
            })
            .collect();
        Self { templates }
    }
}

impl Endpoints {
    /// Template used for `provider`, if it makes network calls
    pub fn template(&self, provider: Provider) -> Option<&str> {
        self.templates.get(&provider).map(String::as_str)
    }

    /// Replace the template for `provider`
    pub fn set(&mut self, provider: Provider, template: impl Into<String>) {
        self.templates.insert(provider, template.into());
    }
}

/// Options applied to every provider request
#[derive(Debug, Clone)]
pub struct CountOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Timeout for connect + full body
    pub timeout: Duration,
    /// Maximum accepted response body size in bytes
    pub max_body_bytes: usize,
    /// Provider endpoint templates
    pub endpoints: Endpoints,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            endpoints: Endpoints::default(),
        }
    }
}

/// Fetch the share count of `url` from `provider` with default options
///
/// For custom options, use [`fetch_count_with_options`].
pub async fn fetch_count(provider: Provider, url: &str) -> Result<u64, CountError> {
    fetch_count_with_options(provider, url, &CountOptions::default()).await
}

/// Fetch the share count of `url` from `provider`
pub async fn fetch_count_with_options(
    provider: Provider,
    url: &str,
    options: &CountOptions,
) -> Result<u64, CountError> {
    provider.fetcher().fetch_count(url, options).await
}
