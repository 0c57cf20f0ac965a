//! Reddit placeholder fetcher
//!
//! Reddit has no count endpoint wired up yet. The fetcher keeps the
//! provider selectable and always answers zero without touching the network.

use super::CountFetcher;
use crate::client::CountOptions;
use crate::error::CountError;
use crate::types::Provider;
use async_trait::async_trait;

/// Reddit share count fetcher (not implemented)
pub struct RedditFetcher;

#[async_trait]
impl CountFetcher for RedditFetcher {
    fn provider(&self) -> Provider {
        Provider::Reddit
    }

    fn default_template(&self) -> Option<&'static str> {
        None
    }

    fn is_implemented(&self) -> bool {
        false
    }

    async fn fetch_count(
        &self,
        _target_url: &str,
        _options: &CountOptions,
    ) -> Result<u64, CountError> {
        Ok(0)
    }
}
