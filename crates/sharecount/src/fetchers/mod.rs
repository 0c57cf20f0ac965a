//! Per-provider share count fetchers
//!
//! Design: each provider has exactly one fetcher. The set is closed and
//! selected through [`Provider::fetcher`]; there is no runtime registry.

mod extract;
mod google_plus;
mod http;
mod pinterest;
mod reddit;
mod stumbleupon;
mod vkontakte;

pub use google_plus::GooglePlusFetcher;
pub use pinterest::PinterestFetcher;
pub use reddit::RedditFetcher;
pub use stumbleupon::StumbleUponFetcher;
pub use vkontakte::VkontakteFetcher;

use crate::client::CountOptions;
use crate::error::CountError;
use crate::types::Provider;
use async_trait::async_trait;

/// Fetches the share count of a target URL from one provider
///
/// Fetchers are stateless: calling `fetch_count` repeatedly with the same
/// upstream response always yields the same result.
#[async_trait]
pub trait CountFetcher: Send + Sync {
    /// Provider served by this fetcher
    fn provider(&self) -> Provider;

    /// Production endpoint template, with a `{url}` placeholder
    ///
    /// `None` for fetchers that never touch the network.
    fn default_template(&self) -> Option<&'static str>;

    /// False for placeholder fetchers whose zero count carries no information
    fn is_implemented(&self) -> bool {
        true
    }

    /// Fetch and extract the share count for `target_url`
    async fn fetch_count(&self, target_url: &str, options: &CountOptions)
        -> Result<u64, CountError>;
}

impl Provider {
    /// Fetcher responsible for this provider
    pub fn fetcher(self) -> &'static dyn CountFetcher {
        match self {
            Provider::GooglePlus => &GooglePlusFetcher,
            Provider::StumbleUpon => &StumbleUponFetcher,
            Provider::Pinterest => &PinterestFetcher,
            Provider::Vkontakte => &VkontakteFetcher,
            Provider::Reddit => &RedditFetcher,
        }
    }
}

/// Resolve the endpoint template a network fetcher should call
fn endpoint<'a>(options: &'a CountOptions, provider: Provider) -> Result<&'a str, CountError> {
    options.endpoints.template(provider).ok_or_else(|| {
        CountError::RequestError(format!("No endpoint configured for {}", provider))
    })
}

/// Run `f` under a WARN-level fmt subscriber and return what it logged
#[cfg(test)]
pub(crate) fn capture_logs(f: impl FnOnce()) -> String {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let buffer = Buffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);

    let logged = buffer.0.lock().unwrap().clone();
    String::from_utf8_lossy(&logged).into_owned()
}
