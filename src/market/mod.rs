//! Market data pipeline.
//!
//! Raw listings are normalized into [`MarketRecord`]s by
//! [`crate::api::DataConverter`]. From there the pipeline is:
//!
//! 1. [`PriceFilter`] keeps records whose price is numeric and in range.
//! 2. [`search`] narrows that view to the rows the table shows.
//! 3. [`MarketAggregates`] derives the chart data from the price-filtered view.
//! 4. [`export_csv`] writes the visible rows.
//!
//! Each step borrows its input and returns a new collection.

mod aggregate;
mod export;
mod filter;
mod record;

pub use aggregate::{
    CategorySeries, MAX_CATEGORIES, MAX_POINTS_PER_CATEGORY, MarketAggregates, PriceStats,
    QuantityRank, TOP_N, UNCATEGORIZED, mean, median, price_stats, scatter_by_category,
    top_by_quantity,
};
pub use export::{export_csv, write_csv};
pub use filter::{PriceFilter, search};
pub use record::{COLUMNS, FieldValue, MarketRecord};
