//! Plain-text presentation of the dashboard.
//!
//! Pure functions from view data to strings; the binary decides where they go.
use rand::Rng;
use radar_common::format::{format_currency, format_number};
use radar_common::symbol::{display_symbol, exchange_of};
use radar_common::Quote;

use crate::chart::{generate_chart, ChartPoint};
use crate::session::{CardView, DashboardView, DetailView, ReadyView};

const TITLE: &str = "Live Stock Radar";
const SUBTITLE: &str = "Real-time market data from the National Stock Exchange of India";
/// Width of the widest chart bar, in cells.
const CHART_WIDTH: usize = 40;

/// Render the whole dashboard.
pub fn render_dashboard<R: Rng + ?Sized>(view: &DashboardView, rng: &mut R) -> String {
    match view {
        DashboardView::Loading => [
            "Loading Stock Data",
            "Fetching the latest market information...",
        ]
        .join("\n"),
        DashboardView::Failed { message } => [
            "Error Loading Data".to_string(),
            "Unable to fetch stock data. Please try again later.".to_string(),
            format!("({})", message),
            "Type `r` to retry.".to_string(),
        ]
        .join("\n"),
        DashboardView::Ready(ready) => render_ready(ready, rng),
    }
}

fn render_ready<R: Rng + ?Sized>(ready: &ReadyView, rng: &mut R) -> String {
    let mut lines = vec![TITLE.to_string(), SUBTITLE.to_string()];
    let mut status = match ready.last_updated {
        Some(at) => format!("Last updated {}", at.format("%H:%M:%S")),
        None => "Not updated yet".to_string(),
    };
    if ready.refreshing {
        status.push_str(" (refreshing...)");
    }
    lines.push(status);
    if let Some(err) = &ready.last_error {
        lines.push(format!("! Showing older data: {}", err));
    }
    lines.push(String::new());

    for (index, card) in ready.cards.iter().enumerate() {
        lines.push(render_card(index + 1, card));
    }
    lines.push(String::new());

    match (&ready.detail, &ready.stale_selection) {
        (Some(detail), _) => lines.push(render_detail(detail, rng)),
        (None, Some(symbol)) => lines.push(format!(
            "{} is not in the latest data.",
            display_symbol(symbol)
        )),
        (None, None) => {}
    }
    lines.join("\n")
}

/// One summary line: marker, number, ticker, price and change.
pub fn render_card(number: usize, card: &CardView) -> String {
    let marker = if card.selected { ">" } else { " " };
    format!(
        "{} [{}] {:<12} {:>14}  {}",
        marker,
        number,
        display_symbol(&card.symbol),
        format_currency(card.quote.current_price),
        change_badge(&card.quote)
    )
}

/// Expanded view of the selected symbol.
pub fn render_detail<R: Rng + ?Sized>(detail: &DetailView, rng: &mut R) -> String {
    let quote = &detail.quote;
    let exchange = exchange_of(&detail.symbol)
        .map(|exchange| exchange.full_name())
        .unwrap_or("Unknown exchange");

    let mut lines = vec![
        format!(
            "{}  {}  {}",
            display_symbol(&detail.symbol),
            format_currency(quote.current_price),
            change_badge(quote)
        ),
        exchange.to_string(),
        String::new(),
        "Price Chart".to_string(),
    ];
    lines.extend(render_chart(&generate_chart(quote, rng)));
    lines.push(String::new());

    lines.push("Trading Information".to_string());
    lines.push(stat("Open", format_currency(quote.open)));
    lines.push(stat("Previous Close", format_currency(quote.previous_close)));
    lines.push(stat(
        "Day Range",
        format!("{} - {}", format_currency(quote.low), format_currency(quote.high)),
    ));
    lines.push(stat("Volume", format_number(quote.volume as f64, false)));
    lines.push(String::new());

    lines.push("Company Information".to_string());
    lines.push(stat("Market Cap", format_number(quote.market_cap, true)));
    lines.push(stat("Dividend Yield", format!("{}%", quote.dividend_yield)));
    lines.join("\n")
}

/// Horizontal bar per point, scaled between the lowest and highest price.
pub fn render_chart(points: &[ChartPoint]) -> Vec<String> {
    let (min, max) = points.iter().fold((f64::MAX, f64::MIN), |(lo, hi), p| {
        (lo.min(p.price), hi.max(p.price))
    });
    let span = max - min;
    points
        .iter()
        .map(|point| {
            let width = if span > 0.0 {
                1 + ((point.price - min) / span * (CHART_WIDTH - 1) as f64).round() as usize
            } else {
                CHART_WIDTH
            };
            format!(
                "{:>4} ago |{:<w$} {}",
                point.label,
                "#".repeat(width),
                format_currency(point.price),
                w = CHART_WIDTH
            )
        })
        .collect()
}

fn change_badge(quote: &Quote) -> String {
    let arrow = if quote.is_up() { "▲" } else { "▼" };
    format!("{} {}%", arrow, quote.change_percent().abs())
}

fn stat(label: &str, value: String) -> String {
    format!("  {:<16}{}", label, value)
}
