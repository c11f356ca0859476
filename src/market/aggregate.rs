//! Chart aggregates over a filtered record set.
//!
//! Every function here is pure: it borrows the records, skips values that
//! do not parse as numbers, and builds a fresh result.

use super::MarketRecord;

/// Number of items kept by [`top_by_quantity`].
pub const TOP_N: usize = 20;

/// Maximum number of category series in [`scatter_by_category`].
pub const MAX_CATEGORIES: usize = 6;

/// Maximum number of points per category series.
pub const MAX_POINTS_PER_CATEGORY: usize = 200;

/// Label used for records without a category.
pub const UNCATEGORIZED: &str = "N/A";

/// Total listed quantity for one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityRank {
    pub item: String,
    /// Wide enough that summing any number of `i64` quantities cannot overflow.
    pub total: i128,
}

/// Mean and median price for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceStats {
    pub item: String,
    pub mean: f64,
    pub median: f64,
}

/// (price, quantity) points for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    pub category: String,
    pub points: Vec<(f64, f64)>,
}

/// All chart data derived from one filtered view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketAggregates {
    pub top_quantities: Vec<QuantityRank>,
    pub price_stats: Vec<PriceStats>,
    pub scatter: Vec<CategorySeries>,
}

impl MarketAggregates {
    /// Compute every aggregate for the given records.
    pub fn compute(records: &[MarketRecord]) -> Self {
        let top_quantities = top_by_quantity(records, TOP_N);
        let price_stats = price_stats(records, &top_quantities);
        let scatter = scatter_by_category(records);
        Self {
            top_quantities,
            price_stats,
            scatter,
        }
    }

    /// Whether there is nothing to chart.
    pub fn is_empty(&self) -> bool {
        self.top_quantities.is_empty() && self.scatter.is_empty()
    }
}

/// Sum integer quantities per item and keep the `n` largest.
///
/// Items appear in first-encounter order before sorting and the sort is
/// stable, so ties keep that order.
pub fn top_by_quantity(records: &[MarketRecord], n: usize) -> Vec<QuantityRank> {
    let mut totals: Vec<QuantityRank> = Vec::new();

    for record in records {
        let Some(quantity) = record.quantity.as_i64() else {
            continue;
        };
        match totals.iter_mut().find(|t| t.item == record.item) {
            Some(rank) => rank.total = rank.total.saturating_add(i128::from(quantity)),
            None => totals.push(QuantityRank {
                item: record.item.clone(),
                total: i128::from(quantity),
            }),
        }
    }

    totals.sort_by(|a, b| b.total.cmp(&a.total));
    totals.truncate(n);
    totals
}

/// Mean and median price of each ranked item, in ranking order.
pub fn price_stats(records: &[MarketRecord], ranking: &[QuantityRank]) -> Vec<PriceStats> {
    ranking
        .iter()
        .map(|rank| {
            let prices: Vec<f64> = records
                .iter()
                .filter(|r| r.item == rank.item)
                .filter_map(|r| r.price.as_f64())
                .collect();
            PriceStats {
                item: rank.item.clone(),
                mean: mean(&prices),
                median: median(&prices),
            }
        })
        .collect()
}

/// Group numeric (price, quantity) points by category.
///
/// Keeps the first [`MAX_CATEGORIES`] categories encountered and the first
/// [`MAX_POINTS_PER_CATEGORY`] points of each. A record whose price or
/// quantity is not numeric contributes no point.
pub fn scatter_by_category(records: &[MarketRecord]) -> Vec<CategorySeries> {
    let mut series: Vec<CategorySeries> = Vec::new();

    for record in records {
        let (Some(price), Some(quantity)) = (record.price.as_f64(), record.quantity.as_f64())
        else {
            continue;
        };
        let category = if record.category.is_empty() {
            UNCATEGORIZED
        } else {
            record.category.as_str()
        };

        let idx = match series.iter().position(|s| s.category == category) {
            Some(idx) => idx,
            None if series.len() < MAX_CATEGORIES => {
                series.push(CategorySeries {
                    category: category.to_string(),
                    points: Vec::new(),
                });
                series.len() - 1
            }
            None => continue,
        };

        let points = &mut series[idx].points;
        if points.len() < MAX_POINTS_PER_CATEGORY {
            points.push((price, quantity));
        }
    }

    series
}

/// Arithmetic mean; 0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median; 0 for an empty slice, mean of the middle pair for even lengths.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}
