//! ShareCount - social share counts for a URL
//!
//! Answers "how many times has this page been shared on network X?" by
//! calling each network's own counting endpoint at request time and
//! extracting a single non-negative count from its response.
//!
//! ## Fetchers
//!
//! Every [`Provider`] maps to exactly one [`CountFetcher`]:
//! - [`GooglePlusFetcher`] - regex over the +1 fastbutton page, lenient
//! - [`VkontakteFetcher`] - regex over the share counter callback, strict
//! - [`StumbleUponFetcher`] - JSON badge API (`result.views`)
//! - [`PinterestFetcher`] - JSONP count API (`count`)
//! - [`RedditFetcher`] - placeholder, always zero
//!
//! Nothing is cached or retried: each call is one live request.

pub mod client;
mod counter;
mod error;
pub mod fetchers;
mod types;

pub use client::{fetch_count, fetch_count_with_options, CountOptions, Endpoints};
pub use counter::{ShareCounter, ShareCounterBuilder};
pub use error::CountError;
pub use fetchers::{
    CountFetcher, GooglePlusFetcher, PinterestFetcher, RedditFetcher, StumbleUponFetcher,
    VkontakteFetcher,
};
pub use types::{Provider, ShareCountResponse};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "ShareCount/1.0";
