//! Core types for share count lookups

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Social network whose share counter is queried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Provider {
    /// Google+ fastbutton endpoint
    #[serde(rename = "googlePlus")]
    GooglePlus,
    /// StumbleUpon badge API
    #[serde(rename = "stumbleupon")]
    StumbleUpon,
    /// Pinterest JSONP count API
    #[serde(rename = "pinterest")]
    Pinterest,
    /// VKontakte share counter
    #[serde(rename = "vkontakte")]
    Vkontakte,
    /// Reddit (not implemented, always zero)
    #[serde(rename = "reddit")]
    Reddit,
}

impl Provider {
    /// All providers, in dispatch order
    pub const ALL: [Provider; 5] = [
        Provider::GooglePlus,
        Provider::StumbleUpon,
        Provider::Pinterest,
        Provider::Vkontakte,
        Provider::Reddit,
    ];

    /// Identifier used by callers to select this provider
    pub fn id(&self) -> &'static str {
        match self {
            Provider::GooglePlus => "googlePlus",
            Provider::StumbleUpon => "stumbleupon",
            Provider::Pinterest => "pinterest",
            Provider::Vkontakte => "vkontakte",
            Provider::Reddit => "reddit",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| format!("Unknown provider: {}", s))
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Share count for a single target URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ShareCountResponse {
    /// The target URL, echoed back as given
    pub url: String,

    /// Share count reported by the provider (0 when unknown)
    pub count: u64,
}

impl ShareCountResponse {
    /// Create a response for the given URL and count
    pub fn new(url: impl Into<String>, count: u64) -> Self {
        Self {
            url: url.into(),
            count,
        }
    }
}
