//! Synthetic intraday chart.
//!
//! There is no historical series behind the dashboard, so the detail panel draws a
//! cosmetic 24-hour walk that ends near the current price, drifts back by the day's
//! percent change and wobbles within half of the session's relative range.
use rand::Rng;
use radar_common::Quote;

/// Number of hourly points in a chart.
pub const CHART_POINTS: usize = 24;

/// One hourly sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Hours before now.
    pub hours_ago: usize,
    /// Axis label, e.g. `23h`.
    pub label: String,
    /// Fabricated price.
    pub price: f64,
}

/// Generate the chart for `quote`, oldest point first.
pub fn generate_chart<R: Rng + ?Sized>(quote: &Quote, rng: &mut R) -> Vec<ChartPoint> {
    let change = quote.change_percent();
    let volatility = if quote.low > 0.0 {
        (quote.high - quote.low) / quote.low * 0.5
    } else {
        0.0
    };

    (0..CHART_POINTS)
        .map(|i| {
            let hours_ago = CHART_POINTS - i - 1;
            let base = quote.current_price
                * (1.0 - change / 100.0 * hours_ago as f64 / CHART_POINTS as f64);
            let noise: f64 = rng.random_range(-1.0..1.0);
            ChartPoint {
                hours_ago,
                label: format!("{}h", hours_ago),
                price: base * (1.0 + noise * volatility),
            }
        })
        .collect()
}
