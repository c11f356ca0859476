//! Market charts drawn from [`MarketAggregates`].

use ratatui::{
    Frame,
    layout::{Direction, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};

use super::truncate_chars;
use crate::market::{CategorySeries, MarketAggregates};

/// Longest item label drawn on a chart.
const LABEL_WIDTH: usize = 16;

const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Red,
    Color::Blue,
];

/// Horizontal bars of the top items by total quantity.
pub fn render_top_quantities(frame: &mut Frame, area: Rect, aggregates: &MarketAggregates) {
    let block = chart_block(" Top quantities ");
    if aggregates.top_quantities.is_empty() {
        render_empty(frame, area, block);
        return;
    }

    let bars: Vec<Bar> = aggregates
        .top_quantities
        .iter()
        .map(|rank| {
            Bar::default()
                .value(u64::try_from(rank.total.max(0)).unwrap_or(u64::MAX))
                .text_value(rank.total.to_string())
                .label(Line::from(truncate_chars(&rank.item, LABEL_WIDTH)))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}

/// Mean and median price side by side for the same items.
pub fn render_price_stats(frame: &mut Frame, area: Rect, aggregates: &MarketAggregates) {
    let block = chart_block(" Mean / median price ");
    if aggregates.price_stats.is_empty() {
        render_empty(frame, area, block);
        return;
    }

    let mut chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(1);

    for stats in &aggregates.price_stats {
        let bars = [
            price_bar(stats.mean, Color::Yellow),
            price_bar(stats.median, Color::Magenta),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(truncate_chars(&stats.item, LABEL_WIDTH)))
                .bars(&bars),
        );
    }

    frame.render_widget(chart, area);
}

fn price_bar(value: f64, color: Color) -> Bar<'static> {
    Bar::default()
        .value(value.max(0.0).round() as u64)
        .text_value(format!("{:.2}", value))
        .style(Style::default().fg(color))
}

/// Price against quantity, one series per category.
pub fn render_scatter(frame: &mut Frame, area: Rect, aggregates: &MarketAggregates) {
    let block = chart_block(" Price vs quantity ");
    if aggregates.scatter.is_empty() {
        render_empty(frame, area, block);
        return;
    }

    let (x_bounds, y_bounds) = bounds(&aggregates.scatter);

    let datasets = aggregates
        .scatter
        .iter()
        .zip(SERIES_COLORS.iter().cycle())
        .map(|(series, color)| {
            Dataset::default()
                .name(series.category.as_str())
                .marker(Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(*color))
                .data(&series.points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Price")
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title("Qty")
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );

    frame.render_widget(chart, area);
}

/// Axis bounds covering every point, never zero-width.
fn bounds(series: &[CategorySeries]) -> ([f64; 2], [f64; 2]) {
    let points = series.iter().flat_map(|s| s.points.iter());
    let (mut x, mut y) = ([f64::MAX, f64::MIN], [f64::MAX, f64::MIN]);
    for &(px, py) in points {
        x = [x[0].min(px), x[1].max(px)];
        y = [y[0].min(py), y[1].max(py)];
    }
    (widen(x), widen(y))
}

fn widen([lo, hi]: [f64; 2]) -> [f64; 2] {
    if lo > hi {
        [0.0, 1.0]
    } else if lo == hi {
        [lo - 1.0, hi + 1.0]
    } else {
        [lo, hi]
    }
}

fn axis_labels([lo, hi]: [f64; 2]) -> Vec<Line<'static>> {
    vec![
        Line::from(format!("{:.0}", lo)),
        Line::from(format!("{:.0}", (lo + hi) / 2.0)),
        Line::from(format!("{:.0}", hi)),
    ]
}

fn chart_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn render_empty(frame: &mut Frame, area: Rect, block: Block<'_>) {
    let paragraph = Paragraph::new("No data")
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
    frame.render_widget(paragraph, area);
}
