//! Dark pool signal.

use crate::common::{format_money, format_pct};
use crate::models::market::{DarkPoolStats, MarketSession};
use crate::models::signal::{Bias, Confidence, Signal, SignalKind};

const BULLISH_PCT: f64 = 60.0;
const BEARISH_PCT: f64 = 40.0;
const HIGH_CONFIDENCE_PRINTS: u64 = 10;
const MEDIUM_CONFIDENCE_PRINTS: u64 = 3;

pub fn dark_pool_bias(bullish_pct: f64) -> Bias {
    if bullish_pct > BULLISH_PCT {
        Bias::Bullish
    } else if bullish_pct < BEARISH_PCT {
        Bias::Bearish
    } else {
        Bias::Neutral
    }
}

pub fn dark_pool_confidence(print_count: u64) -> Confidence {
    if print_count >= HIGH_CONFIDENCE_PRINTS {
        Confidence::High
    } else if print_count >= MEDIUM_CONFIDENCE_PRINTS {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

pub fn build_dark_pool_signal(
    ticker: &str,
    stats: &DarkPoolStats,
    session: MarketSession,
) -> Signal {
    if !session.is_open() {
        return Signal::no_data(
            SignalKind::DarkPool,
            format!(
                "Dark pool prints are only tracked during regular trading hours ({}).",
                session
            ),
        );
    }

    let metrics = stats.normalize();
    if metrics.print_count == 0 {
        return Signal::no_data(
            SignalKind::DarkPool,
            format!("No dark pool prints for {} yet.", ticker.to_uppercase()),
        );
    }

    let bias = dark_pool_bias(metrics.bullish_pct);
    let confidence = dark_pool_confidence(metrics.print_count);
    let noun = if metrics.print_count == 1 { "print" } else { "prints" };
    let lean = match bias {
        Bias::Bullish => "buyers in control",
        Bias::Bearish => "sellers in control",
        _ => "no clear side",
    };

    let summary = format!(
        "{} across {} dark pool {}: {:.0}% bullish / {:.0}% bearish, {}.",
        format_money(metrics.total_value),
        metrics.print_count,
        noun,
        metrics.bullish_pct,
        metrics.bearish_pct,
        lean
    );

    let mut details = vec![
        format!("Total value: {}", format_money(metrics.total_value)),
        format!("Prints: {}", metrics.print_count),
        format!("Bullish: {}", format_pct(metrics.bullish_pct)),
        format!("Bearish: {}", format_pct(metrics.bearish_pct)),
    ];
    if let Some(regime) = metrics.regime {
        details.push(format!("Regime: {}", regime.label()));
    }

    Signal::new(SignalKind::DarkPool, bias, confidence, summary, details)
}
