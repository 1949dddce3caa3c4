//! Options flow signal.

use crate::common::{format_signed_money, format_pct};
use crate::models::market::{FlowMetrics, FlowStats, MarketSession};
use crate::models::signal::{Bias, Confidence, Signal, SignalKind};

const DIRECTIONAL_RATIO: f64 = 65.0;
const HIGH_CONFIDENCE_TRADES: u64 = 50;
const MEDIUM_CONFIDENCE_TRADES: u64 = 20;
const SWEEP_CALLOUT_PCT: f64 = 10.0;
const NET_FLOW_CALLOUT: f64 = 100_000.0;

pub fn flow_bias(metrics: &FlowMetrics) -> Bias {
    if metrics.call_ratio >= DIRECTIONAL_RATIO {
        Bias::Bullish
    } else if metrics.put_ratio >= DIRECTIONAL_RATIO {
        Bias::Bearish
    } else {
        Bias::Neutral
    }
}

pub fn flow_confidence(trade_count: u64) -> Confidence {
    if trade_count >= HIGH_CONFIDENCE_TRADES {
        Confidence::High
    } else if trade_count >= MEDIUM_CONFIDENCE_TRADES {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Build the options flow signal. Flow is only meaningful while the market
/// is open and at least one trade has printed.
pub fn build_flow_signal(ticker: &str, stats: &FlowStats, session: MarketSession) -> Signal {
    if !session.is_open() {
        return Signal::no_data(
            SignalKind::OptionsFlow,
            format!(
                "Options flow is only tracked during regular trading hours ({}).",
                session
            ),
        );
    }

    let metrics = stats.normalize();
    if metrics.trade_count == 0 {
        return Signal::no_data(
            SignalKind::OptionsFlow,
            format!("No options flow recorded for {} yet.", ticker.to_uppercase()),
        );
    }

    let bias = flow_bias(&metrics);
    let confidence = flow_confidence(metrics.trade_count);

    let mut summary = match bias {
        Bias::Bullish => format!(
            "Call-heavy options flow: {:.0}% calls vs {:.0}% puts across {} trades.",
            metrics.call_ratio, metrics.put_ratio, metrics.trade_count
        ),
        Bias::Bearish => format!(
            "Put-heavy options flow: {:.0}% puts vs {:.0}% calls across {} trades.",
            metrics.put_ratio, metrics.call_ratio, metrics.trade_count
        ),
        _ => format!(
            "Balanced options flow: {:.0}% calls / {:.0}% puts across {} trades.",
            metrics.call_ratio, metrics.put_ratio, metrics.trade_count
        ),
    };
    let mut details = vec![
        format!("Calls: {}", format_pct(metrics.call_ratio)),
        format!("Puts: {}", format_pct(metrics.put_ratio)),
        format!("Trades: {}", metrics.trade_count),
    ];

    let sweep_pct = metrics.sweep_ratio * 100.0;
    if sweep_pct > SWEEP_CALLOUT_PCT {
        summary.push_str(&format!(
            " Sweeps make up {:.0}% of flow, a sign of urgency.",
            sweep_pct
        ));
        details.push(format!("Sweeps: {}", format_pct(sweep_pct)));
    }

    if metrics.net_delta_adjusted_flow.abs() > NET_FLOW_CALLOUT {
        let net = format_signed_money(metrics.net_delta_adjusted_flow);
        summary.push_str(&format!(" Net delta-adjusted flow is {}.", net));
        details.push(format!("Net delta flow: {}", net));
    }

    if metrics.unusual_count > 0 {
        let noun = if metrics.unusual_count == 1 { "trade" } else { "trades" };
        summary.push_str(&format!(
            " {} unusual {} flagged.",
            metrics.unusual_count, noun
        ));
        details.push(format!("Unusual trades: {}", metrics.unusual_count));
    }

    Signal::new(SignalKind::OptionsFlow, bias, confidence, summary, details)
}
