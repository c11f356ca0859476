//! Paladium API integration.
//!
//! This module provides the HTTP client, the [`MarketApi`] seam the rest
//! of the application talks to, and conversion of raw responses into
//! market records.

mod client;
mod converter;

pub use client::ApiClient;
pub use converter::DataConverter;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body parsed as JSON.
    Json(Value),
    /// Body that was not valid JSON, kept verbatim.
    Text(String),
}

impl Payload {
    /// Human-readable rendering: indented JSON or the raw text.
    pub fn pretty(&self) -> String {
        match self {
            Self::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            Self::Text(text) => text.clone(),
        }
    }
}

/// Server-side sort key for market pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    QuantityDesc,
}

impl SortKey {
    /// Query-string value; empty means "no sort parameter".
    pub fn as_param(self) -> &'static str {
        match self {
            Self::None => "",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::QuantityDesc => "quantity_desc",
        }
    }

    /// The next key in the cycle.
    pub fn next(self) -> Self {
        match self {
            Self::None => Self::PriceAsc,
            Self::PriceAsc => Self::PriceDesc,
            Self::PriceDesc => Self::QuantityDesc,
            Self::QuantityDesc => Self::None,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            other => f.write_str(other.as_param()),
        }
    }
}

/// Parameters for one market page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuery {
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
    /// Free-text query; omitted from the request when empty.
    pub search: String,
    pub sort: SortKey,
}

/// Read-only operations against the game API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Fetch one page of market listings.
    async fn fetch_market_page(&self, query: &MarketQuery) -> Result<Payload>;

    /// Fetch a player profile by name or UUID.
    async fn fetch_player(&self, id: &str) -> Result<Payload>;

    /// Fetch a faction profile.
    async fn fetch_faction(&self, id: &str) -> Result<Payload>;

    /// Fetch server status.
    async fn fetch_status(&self) -> Result<Payload>;
}
