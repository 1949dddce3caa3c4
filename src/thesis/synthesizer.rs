//! Session-aware fusion of the domain signals into one thesis.
//!
//! Each call is independent: the session picks the branch, the branch counts
//! active bullish/bearish signals, applies its bias table, then builds the
//! narrative, setup and risk for that bias.

use tracing::trace;

use crate::common::{format_price, format_signed_pct, level_label};
use crate::models::market::{Direction, Levels, MarketSession, MlPrediction};
use crate::models::signal::{Bias, Signal, SignalSet};
use crate::models::thesis::{ThesisBias, TradeSetup, UnifiedThesis};
use crate::thesis::gap::{Gap, GapDirection};
use crate::thesis::narrative::{
    approach_sentence, gap_sentence, gex_zone_sentence, invalidation_sentence, ml_sentence,
    move_probability_label, wall_proximity_sentences, Narrative,
};
use crate::thesis::setup::{calculate_setup, EntryAnchor, CALL_WALL, PUT_WALL};

const LIMITED_DATA: &str =
    "Limited data right now. Wait for more signals to line up before taking a position.";

/// Borrowed view of everything the synthesizer reads.
#[derive(Debug, Clone, Copy)]
pub struct ThesisInput<'a> {
    pub ticker: &'a str,
    pub price: f64,
    pub change_percent: f64,
    pub session: MarketSession,
    pub signals: &'a SignalSet,
    pub levels: &'a Levels,
    pub ml: Option<&'a MlPrediction>,
}

pub fn synthesize_thesis(input: &ThesisInput<'_>) -> UnifiedThesis {
    match input.session {
        MarketSession::Closed | MarketSession::AfterHours => inactive_thesis(input),
        MarketSession::PreMarket => pre_market_thesis(input),
        MarketSession::Open => open_thesis(input),
    }
}

/// Pre-market bias table, first match wins.
pub fn pre_market_bias(bullish: usize, bearish: usize, gap: &Gap) -> ThesisBias {
    if bullish >= 2 || (gap.is_up() && bullish >= 1) {
        ThesisBias::Bullish
    } else if bearish >= 2 || (gap.is_down() && bearish >= 1) {
        ThesisBias::Bearish
    } else if gap.is_up() {
        ThesisBias::Bullish
    } else if gap.is_down() {
        ThesisBias::Bearish
    } else {
        ThesisBias::Neutral
    }
}

/// Regular-session bias table.
///
/// With an ML signal the model's direction wins whenever no signal confirms
/// it, even against a contrary majority.
pub fn open_bias(bullish: usize, bearish: usize, ml: Option<&MlPrediction>) -> ThesisBias {
    match ml.filter(|ml| ml.has_signal) {
        Some(ml) => match ml.direction {
            Direction::Bullish if bullish >= 2 => ThesisBias::Bullish,
            Direction::Bearish if bearish >= 2 => ThesisBias::Bearish,
            Direction::Bullish if bullish >= 1 => ThesisBias::Bullish,
            Direction::Bearish if bearish >= 1 => ThesisBias::Bearish,
            direction => ThesisBias::from(direction),
        },
        None => {
            if bullish >= 3 {
                ThesisBias::Bullish
            } else if bearish >= 3 {
                ThesisBias::Bearish
            } else if bullish >= 2 && bearish == 0 {
                ThesisBias::Bullish
            } else if bearish >= 2 && bullish == 0 {
                ThesisBias::Bearish
            } else {
                ThesisBias::Neutral
            }
        }
    }
}

fn active_summary(signal: &Signal) -> Option<String> {
    signal.is_active().then(|| signal.summary.clone())
}

/// Relative strength only adds to the story when it leans one way.
fn directional_summary(signal: &Signal) -> Option<String> {
    (signal.is_active() && signal.bias != Bias::Neutral).then(|| signal.summary.clone())
}

fn inactive_thesis(input: &ThesisInput<'_>) -> UnifiedThesis {
    let ticker = input.ticker.to_uppercase();
    let change = format_signed_pct(input.change_percent);
    let (one_liner, body) = match input.session {
        MarketSession::AfterHours => (
            format!("After hours: {} {} on the day", ticker, change),
            format!(
                "Regular trading has ended. {} is {} on the day at {}. After-hours prints are thin, so flow and dark pool signals are paused until the next session.",
                ticker,
                change,
                format_price(input.price)
            ),
        ),
        _ => (
            format!("Market closed: {} {} on the day", ticker, change),
            format!(
                "The market is closed. {} finished the day {} at {}. Signals refresh at the next pre-market session.",
                ticker,
                change,
                format_price(input.price)
            ),
        ),
    };

    UnifiedThesis {
        bias: ThesisBias::Neutral,
        one_liner,
        body,
        setup: TradeSetup::empty(),
        risk: None,
    }
}

fn pre_market_thesis(input: &ThesisInput<'_>) -> UnifiedThesis {
    let ticker = input.ticker.to_uppercase();
    let signals = input.signals;
    let bullish = signals.bullish_count();
    let bearish = signals.bearish_count();
    let gap = Gap::classify(input.change_percent);
    let bias = pre_market_bias(bullish, bearish, &gap);

    trace!(
        ticker = %ticker,
        bullish,
        bearish,
        gap_pct = input.change_percent,
        big_gap = gap.is_big,
        bias = %bias,
        "Pre-market bias"
    );

    let mut levels_paragraph = Narrative::new();
    levels_paragraph.push_opt(
        input
            .levels
            .gex_flip()
            .map(|flip| gex_zone_sentence(input.price, flip, gap.direction)),
    );
    for sentence in wall_proximity_sentences(input.price, input.levels) {
        levels_paragraph.push(sentence);
    }

    let mut body = Narrative::new();
    body.push(gap_sentence(&ticker, input.price, &gap))
        .push_opt(active_summary(&signals.news))
        .push_opt(directional_summary(&signals.relative_strength))
        .push_if(!levels_paragraph.is_empty(), || levels_paragraph.render())
        .push(approach_sentence(&gap));

    let one_liner = match gap.direction {
        GapDirection::Flat => format!(
            "{} pre-market lean: {} flat ({})",
            bias.label(),
            ticker,
            format_signed_pct(gap.change_percent)
        ),
        GapDirection::Up | GapDirection::Down => format!(
            "{} pre-market lean: {} gapping {} {}",
            bias.label(),
            ticker,
            if gap.is_up() { "up" } else { "down" },
            format_signed_pct(gap.change_percent)
        ),
    };

    let risk = if gap.is_big {
        let mut risk = Narrative::new();
        risk.push("Big gap: expect volatility at the open and a possible partial fill.")
            .push_opt(invalidation_sentence(bias, input.price, input.levels));
        risk.render()
    } else {
        "Pre-market data is thin and levels can shift at the open. Wait for the first 15 minutes of regular trading to confirm before sizing up.".to_string()
    };

    UnifiedThesis {
        bias,
        one_liner,
        body: body.render(),
        setup: calculate_setup(bias, input.price, input.levels, EntryAnchor::pre_market()),
        risk: Some(risk),
    }
}

fn open_thesis(input: &ThesisInput<'_>) -> UnifiedThesis {
    let signals = input.signals;
    let bullish = signals.bullish_count();
    let bearish = signals.bearish_count();
    let ml_signal = input.ml.filter(|ml| ml.has_signal);
    let bias = open_bias(bullish, bearish, input.ml);

    trace!(
        ticker = %input.ticker,
        bullish,
        bearish,
        ml = ml_signal.is_some(),
        bias = %bias,
        "Open-session bias"
    );

    let mut body = Narrative::new();
    body.push_opt(ml_signal.map(ml_sentence))
        .push_opt(active_summary(&signals.flow))
        .push_opt(active_summary(&signals.dark_pool))
        .push_opt(directional_summary(&signals.relative_strength))
        .push_opt(
            input
                .levels
                .gex_flip()
                .map(|flip| gex_zone_sentence(input.price, flip, GapDirection::Flat)),
        );
    if body.is_empty() {
        body.push(LIMITED_DATA);
    }

    let one_liner = format!(
        "{} bias | {} move probability",
        bias.label(),
        move_probability_label(input.ml)
    );

    UnifiedThesis {
        bias,
        one_liner,
        body: body.render(),
        setup: calculate_setup(bias, input.price, input.levels, EntryAnchor::Spot),
        risk: Some(open_risk(bias, input.price, input.levels)),
    }
}

fn open_risk(bias: ThesisBias, price: f64, levels: &Levels) -> String {
    match bias {
        ThesisBias::Bullish => match invalidation_sentence(bias, price, levels) {
            Some(invalidation) => {
                format!("{} Cut the position if that level breaks.", invalidation)
            }
            None => "No support level below price; size down and use a tight stop.".to_string(),
        },
        ThesisBias::Bearish => match invalidation_sentence(bias, price, levels) {
            Some(invalidation) => format!("{} Cover if that level breaks.", invalidation),
            None => "No resistance level above price; size down and use a tight stop.".to_string(),
        },
        ThesisBias::Neutral | ThesisBias::Conflicting => {
            match (levels.put_wall(), levels.call_wall()) {
                (Some(put), Some(call)) => format!(
                    "No directional edge. Range is {} to {}; avoid directional bets until price breaks out of it.",
                    level_label(put, PUT_WALL),
                    level_label(call, CALL_WALL)
                ),
                (Some(put), None) => format!(
                    "No directional edge. Support sits at {}; avoid directional bets until signals align.",
                    level_label(put, PUT_WALL)
                ),
                (None, Some(call)) => format!(
                    "No directional edge. Resistance sits at {}; avoid directional bets until signals align.",
                    level_label(call, CALL_WALL)
                ),
                (None, None) => {
                    "No directional edge and no clear levels; avoid directional bets until signals align."
                        .to_string()
                }
            }
        }
    }
}
