//! Price-range filtering.

use super::MarketRecord;
use crate::error::{Error, Result};

/// Inclusive price bounds. Either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceFilter {
    /// Create a filter from optional bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Build a filter from the text of the min/max inputs.
    ///
    /// Blank text leaves that side open; anything else must be a number.
    pub fn parse(min: &str, max: &str) -> Result<Self> {
        Ok(Self {
            min: parse_bound("minimum", min)?,
            max: parse_bound("maximum", max)?,
        })
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether a record passes: its price is numeric and within bounds.
    pub fn accepts(&self, record: &MarketRecord) -> bool {
        let Some(price) = record.price.as_f64() else {
            return false;
        };
        if let Some(min) = self.min
            && price < min
        {
            return false;
        }
        if let Some(max) = self.max
            && price > max
        {
            return false;
        }
        true
    }

    /// The records that pass, in their original order.
    pub fn apply(&self, records: &[MarketRecord]) -> Vec<MarketRecord> {
        records
            .iter()
            .filter(|r| self.accepts(r))
            .cloned()
            .collect()
    }
}

fn parse_bound(label: &str, text: &str) -> Result<Option<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(Some)
        .map_err(|_| Error::invalid_input(format!("{label} price '{text}' is not a number")))
}

/// Records matching a free-text search term, in their original order.
pub fn search<'a>(records: &'a [MarketRecord], term: &str) -> Vec<&'a MarketRecord> {
    records.iter().filter(|r| r.matches_search(term)).collect()
}
