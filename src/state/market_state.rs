//! Market tab state.

use crate::api::{MarketQuery, SortKey};
use crate::error::Result;
use crate::market::{self, MarketAggregates, MarketRecord, PriceFilter};
use chrono::{DateTime, Utc};

/// State for the market tab.
///
/// `records` holds the last fetched page untouched. `filtered` and
/// `aggregates` are rebuilt from it whenever the price bounds change, so
/// no derived state outlives a filter change.
#[derive(Debug)]
pub struct MarketState {
    /// Last fetched page, as normalized.
    pub records: Vec<MarketRecord>,
    /// Records passing the price filter.
    pub filtered: Vec<MarketRecord>,
    /// Chart data for `filtered`.
    pub aggregates: MarketAggregates,
    /// Free-text search term.
    pub search: String,
    /// Min price input text.
    pub min_price: String,
    /// Max price input text.
    pub max_price: String,
    /// Bounds currently applied.
    pub price_filter: PriceFilter,
    /// Problem with the bound inputs, if any.
    pub filter_error: Option<String>,
    /// Server-side sort key.
    pub sort: SortKey,
    /// Current 1-based page.
    pub page: u32,
    /// Listings per page.
    pub page_size: u32,
    /// Currently selected visible row.
    pub selected_index: Option<usize>,
    /// Whether a page request is in flight.
    pub loading: bool,
    /// Last update timestamp.
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for MarketState {
    fn default() -> Self {
        Self::new(50)
    }
}

impl MarketState {
    /// Create an empty market state.
    pub fn new(page_size: u32) -> Self {
        Self {
            records: Vec::new(),
            filtered: Vec::new(),
            aggregates: MarketAggregates::default(),
            search: String::new(),
            min_price: String::new(),
            max_price: String::new(),
            price_filter: PriceFilter::default(),
            filter_error: None,
            sort: SortKey::None,
            page: 1,
            page_size,
            selected_index: None,
            loading: false,
            last_updated: None,
        }
    }

    /// Parameters for fetching the current page.
    pub fn query(&self) -> MarketQuery {
        MarketQuery {
            page: self.page,
            page_size: self.page_size,
            search: self.search.trim().to_string(),
            sort: self.sort,
        }
    }

    /// Replace the page wholesale and rebuild the derived views.
    pub fn replace_records(&mut self, records: Vec<MarketRecord>) {
        self.records = records;
        self.loading = false;
        self.last_updated = Some(Utc::now());
        self.refilter();
    }

    /// Update the price bound inputs.
    ///
    /// On invalid input the previous bounds and view stay in place and the
    /// problem is kept in `filter_error`.
    pub fn set_price_bounds(&mut self, min: &str, max: &str) -> Result<()> {
        self.min_price = min.to_string();
        self.max_price = max.to_string();
        match PriceFilter::parse(min, max) {
            Ok(filter) => {
                self.price_filter = filter;
                self.filter_error = None;
                self.refilter();
                Ok(())
            }
            Err(e) => {
                self.filter_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Update the search term.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.clamp_selection();
    }

    /// Rebuild `filtered` and `aggregates` from `records`.
    pub fn refilter(&mut self) {
        self.filtered = self.price_filter.apply(&self.records);
        self.aggregates = MarketAggregates::compute(&self.filtered);
        self.clamp_selection();
    }

    /// Rows shown in the table: price-filtered, then text-searched.
    pub fn visible_rows(&self) -> Vec<&MarketRecord> {
        market::search(&self.filtered, &self.search)
    }

    /// Get the currently selected row.
    pub fn selected_row(&self) -> Option<&MarketRecord> {
        self.selected_index
            .and_then(|i| self.visible_rows().get(i).copied())
    }

    /// Go to the next page.
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Go to the previous page. Returns false on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_rows().len();
        self.selected_index = match (count, self.selected_index) {
            (0, _) => None,
            (n, Some(i)) => Some(i.min(n - 1)),
            (_, None) => Some(0),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::FieldValue;
    use pretty_assertions::assert_eq;

    fn listing(item: &str, price: f64) -> MarketRecord {
        MarketRecord {
            item: item.to_string(),
            category: "blocks".to_string(),
            price: FieldValue::from(price),
            quantity: FieldValue::from(1),
            seller: String::new(),
            timestamp: String::new(),
        }
    }

    fn loaded() -> MarketState {
        let mut state = MarketState::new(50);
        state.replace_records(vec![
            listing("stone", 1.0),
            listing("obsidian", 25.0),
            listing("paladium ingot", 400.0),
        ]);
        state
    }

    fn visible(state: &MarketState) -> Vec<&str> {
        state.visible_rows().iter().map(|r| r.item.as_str()).collect()
    }

    #[test]
    fn test_replace_records_rebuilds_view() {
        let state = loaded();
        assert_eq!(state.filtered.len(), 3);
        assert_eq!(state.aggregates.top_quantities.len(), 3);
        assert_eq!(state.selected_index, Some(0));
        assert!(state.last_updated.is_some());
    }

    #[test]
    fn test_price_bounds_recompute_from_raw() {
        let mut state = loaded();

        state.set_price_bounds("10", "").unwrap();
        assert_eq!(visible(&state), vec!["obsidian", "paladium ingot"]);

        state.set_price_bounds("", "").unwrap();
        assert_eq!(visible(&state).len(), 3);
        assert_eq!(state.records.len(), 3);
    }

    #[test]
    fn test_invalid_bound_keeps_previous_view() {
        let mut state = loaded();
        state.set_price_bounds("", "100").unwrap();

        assert!(state.set_price_bounds("", "1o0").is_err());

        assert_eq!(visible(&state), vec!["stone", "obsidian"]);
        assert_eq!(state.max_price, "1o0");
        assert!(state.filter_error.is_some());
    }

    #[test]
    fn test_search_narrows_visible_rows_only() {
        let mut state = loaded();

        state.set_search("PALADIUM");

        assert_eq!(visible(&state), vec!["paladium ingot"]);
        assert_eq!(state.filtered.len(), 3);
        assert_eq!(state.aggregates.top_quantities.len(), 3);
        assert_eq!(state.selected_index, Some(0));
    }

    #[test]
    fn test_pagination() {
        let mut state = MarketState::new(50);
        assert!(!state.prev_page());
        assert_eq!(state.page, 1);
        state.next_page();
        state.next_page();
        assert!(state.prev_page());
        assert_eq!(state.query().page, 2);
    }

    #[test]
    fn test_query_trims_search() {
        let mut state = MarketState::new(25);
        state.set_search("  sword ");
        state.sort = SortKey::QuantityDesc;
        assert_eq!(
            state.query(),
            MarketQuery {
                page: 1,
                page_size: 25,
                search: "sword".to_string(),
                sort: SortKey::QuantityDesc,
            }
        );
    }
}
