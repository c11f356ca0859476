//! HTTP client for the Paladium API.

use super::{MarketApi, MarketQuery, Payload};
use crate::config::{AuthScheme, Config};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Request, Url};
use std::time::Duration;

const MARKET_ITEMS: &[&str] = &["v1", "paladium", "shop", "market", "items"];
const PLAYERS: &[&str] = &["v1", "players"];
const FACTIONS: &[&str] = &["v1", "factions"];
const STATUS: &[&str] = &["v1", "status"];

/// Query parameter carrying the key under [`AuthScheme::Query`].
const API_KEY_PARAM: &str = "apikey";

/// Authenticated client for the Paladium API.
///
/// Built from a [`Config`] snapshot. A failed request is reported as-is:
/// there is no retry, backoff or rate limiting.
pub struct ApiClient {
    config: Config,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            config: config.clone(),
            http,
        })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a GET request for the endpoint at `segments`, with auth applied.
    pub fn request(&self, segments: &[&str], params: &[(&str, String)]) -> Result<Request> {
        let url = self.endpoint(segments)?;
        let key = self.config.api_key.as_str();
        let mut params = params.to_vec();

        let mut builder = self.http.get(url).header(ACCEPT, "application/json");
        builder = match self.config.auth_scheme {
            AuthScheme::Bearer => builder.header(AUTHORIZATION, format!("Bearer {key}")),
            AuthScheme::Plain => builder.header(AUTHORIZATION, key),
            AuthScheme::ApiKeyHeader => builder.header(self.config.auth_header.as_str(), key),
            AuthScheme::Query => {
                params.push((API_KEY_PARAM, key.to_string()));
                builder
            }
        };

        Ok(builder.query(&params).build()?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let base = self.config.api_base.trim_end_matches('/');
        let mut url = Url::parse(base)
            .map_err(|e| Error::config(format!("invalid API base '{base}': {e}")))?;
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("API base '{base}' cannot have a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, segments: &[&str], params: &[(&str, String)]) -> Result<Payload> {
        let request = self.request(segments, params)?;
        tracing::debug!(url = %request.url().path(), "GET");

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, "API request failed");
            return Err(Error::Status { status, body });
        }

        Ok(match serde_json::from_str(&body) {
            Ok(value) => Payload::Json(value),
            Err(_) => Payload::Text(body),
        })
    }
}

fn with_id<'a>(base: &[&'a str], id: &'a str) -> Vec<&'a str> {
    let mut segments = base.to_vec();
    segments.push(id);
    segments
}

/// Query parameters for a market page request.
pub(crate) fn market_params(query: &MarketQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", query.page.to_string()),
        ("size", query.page_size.to_string()),
    ];
    if !query.search.is_empty() {
        params.push(("q", query.search.clone()));
    }
    if !query.sort.as_param().is_empty() {
        params.push(("sort", query.sort.as_param().to_string()));
    }
    params
}

#[async_trait]
impl MarketApi for ApiClient {
    async fn fetch_market_page(&self, query: &MarketQuery) -> Result<Payload> {
        self.get(MARKET_ITEMS, &market_params(query)).await
    }

    async fn fetch_player(&self, id: &str) -> Result<Payload> {
        self.get(&with_id(PLAYERS, id), &[]).await
    }

    async fn fetch_faction(&self, id: &str) -> Result<Payload> {
        self.get(&with_id(FACTIONS, id), &[]).await
    }

    async fn fetch_status(&self) -> Result<Payload> {
        self.get(STATUS, &[]).await
    }
}
