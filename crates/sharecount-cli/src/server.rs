//! Standalone HTTP endpoint
//!
//! Every path answers `GET ?type=<provider>&url=<target>` with
//! `{"url": "...", "count": N}`. Errors become a 500 with a plain-text body,
//! so they can never be mistaken for a zero count.

use axum::extract::{RawQuery, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Router;
use sharecount::ShareCounter;
use std::net::SocketAddr;
use tracing::{error, info};

/// Query string accepted by the endpoint
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CountQuery {
    /// Provider identifier (`type`)
    pub provider: String,
    /// Target URL (`url`)
    pub url: String,
}

impl CountQuery {
    /// Parse a raw query string
    ///
    /// Missing keys are empty. A repeated key keeps its first value; other
    /// keys are ignored.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut provider = None;
        let mut target = None;
        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "type" if provider.is_none() => provider = Some(value.into_owned()),
                "url" if target.is_none() => target = Some(value.into_owned()),
                _ => {}
            }
        }
        Self {
            provider: provider.unwrap_or_default(),
            url: target.unwrap_or_default(),
        }
    }
}

/// Build the router; all paths and methods hit the same handler
pub fn router(counter: ShareCounter) -> Router {
    Router::new()
        .fallback(share_count_handler)
        .with_state(counter)
}

/// Bind `addr` and serve until the process is stopped
pub async fn run_server(addr: SocketAddr, counter: ShareCounter) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");
    axum::serve(listener, router(counter)).await
}

async fn share_count_handler(
    State(counter): State<ShareCounter>,
    RawQuery(raw): RawQuery,
) -> Response {
    let query = CountQuery::parse(raw.as_deref());
    info!(url = %query.url, provider = %query.provider, "Share count query");

    let result = counter
        .count_by_id(&query.provider, &query.url)
        .await
        .map_err(|e| e.to_string())
        .and_then(|resp| serde_json::to_string(&resp).map_err(|e| e.to_string()));

    match result {
        Ok(body) => {
            info!(output = %body, "Share count answered");
            (
                StatusCode::OK,
                [
                    (CONTENT_TYPE, "application/json; charset=utf-8"),
                    (CACHE_CONTROL, "max-age=300, public"),
                    (PRAGMA, "public"),
                ],
                body,
            )
                .into_response()
        }
        Err(message) => {
            error!(url = %query.url, provider = %query.provider, error = %message, "Share count failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [
                    (CONTENT_TYPE, "text/plain; charset=utf-8"),
                    (CACHE_CONTROL, "no-store"),
                ],
                format!("ERROR {}", message),
            )
                .into_response()
        }
    }
}
