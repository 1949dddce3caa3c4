//! Relative strength against SPY / QQQ.

use crate::common::{format_pct, format_signed_pct};
use crate::models::market::{
    MarketSession, RelativeStrengthMetrics, RelativeStrengthStats, RsRegime,
};
use crate::models::signal::{Bias, Confidence, Signal, SignalKind};

const LOCKSTEP_DROP_PCT: f64 = -1.0;
const LOCKSTEP_MAX_RS: f64 = 0.5;

pub fn regime_bias(regime: RsRegime) -> Bias {
    match regime {
        RsRegime::StrongOutperform | RsRegime::Outperform => Bias::Bullish,
        RsRegime::StrongUnderperform | RsRegime::Underperform => Bias::Bearish,
        RsRegime::Inline => Bias::Neutral,
    }
}

/// Pre-market selloffs where the ticker just tracks the tape are macro, not
/// stock-specific.
fn is_lockstep_selloff(metrics: &RelativeStrengthMetrics, session: MarketSession) -> bool {
    session == MarketSession::PreMarket
        && metrics.ticker_change < LOCKSTEP_DROP_PCT
        && metrics.spy_change < LOCKSTEP_DROP_PCT
        && metrics.rs_vs_spy.abs() < LOCKSTEP_MAX_RS
}

pub fn relative_strength_summary(
    ticker: &str,
    metrics: &RelativeStrengthMetrics,
    session: MarketSession,
) -> String {
    let t = metrics.ticker_change;
    let spy = metrics.spy_change;

    if is_lockstep_selloff(metrics, session) {
        return format!(
            "{} is moving in lockstep with the market ({} vs SPY {}); the weakness is macro-driven, not stock-specific.",
            ticker,
            format_signed_pct(t),
            format_signed_pct(spy)
        );
    }

    if t > 0.0 && spy < 0.0 {
        format!(
            "{} is up {} while SPY is down {}, outperforming a falling market.",
            ticker,
            format_pct(t),
            format_pct(spy.abs())
        )
    } else if t < 0.0 && spy < 0.0 && t > spy {
        format!(
            "{} is down {} but falling less than SPY ({}), showing relative resilience.",
            ticker,
            format_pct(t.abs()),
            format_signed_pct(spy)
        )
    } else {
        let verdict = if metrics.rs_vs_spy > 0.0 {
            "outperforming"
        } else if metrics.rs_vs_spy < 0.0 {
            "underperforming"
        } else {
            "in line with"
        };
        format!(
            "{} {} vs SPY {}, {} the market by {:.2} pts.",
            ticker,
            format_signed_pct(t),
            format_signed_pct(spy),
            verdict,
            metrics.rs_vs_spy.abs()
        )
    }
}

/// Build the relative strength signal. `stats` is `None` when the upstream
/// comparison has not been computed.
pub fn build_relative_strength_signal(
    ticker: &str,
    stats: Option<&RelativeStrengthStats>,
    session: MarketSession,
) -> Signal {
    let ticker = ticker.to_uppercase();
    let Some(stats) = stats else {
        return Signal::no_data(
            SignalKind::RelativeStrength,
            format!("No relative strength data for {}.", ticker),
        );
    };

    let metrics = stats.normalize();
    let session = metrics.session.unwrap_or(session);
    let bias = regime_bias(metrics.regime);
    let confidence = if session == MarketSession::PreMarket {
        Confidence::Low
    } else {
        Confidence::Medium
    };

    let summary = relative_strength_summary(&ticker, &metrics, session);
    let details = vec![
        format!("vs SPY: {}", format_signed_pct(metrics.rs_vs_spy)),
        format!("vs QQQ: {}", format_signed_pct(metrics.rs_vs_qqq)),
        format!("QQQ: {}", format_signed_pct(metrics.qqq_change)),
        format!("Regime: {}", metrics.regime.label()),
    ];

    Signal::new(SignalKind::RelativeStrength, bias, confidence, summary, details)
}
