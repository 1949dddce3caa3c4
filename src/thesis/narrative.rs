//! Narrative assembly.
//!
//! A thesis body is an ordered list of clauses, each appended only when its
//! condition holds. The clause generators below are plain functions so each
//! sentence can be checked on its own.

use crate::common::{format_price, format_signed_pct};
use crate::models::market::{Direction, Levels, MlPrediction, SignalStrength};
use crate::models::thesis::ThesisBias;
use crate::thesis::gap::{Gap, GapDirection};
use crate::thesis::setup::{stop_level, CALL_WALL, PUT_WALL};

const NEAR_WALL_PCT: f64 = 2.0;
const HIGH_MOVE_PROBABILITY: f64 = 0.8;
const MODERATE_MOVE_PROBABILITY: f64 = 0.6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Narrative {
    clauses: Vec<String>,
}

impl Narrative {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clause. Blank text is ignored.
    pub fn push(&mut self, clause: impl Into<String>) -> &mut Self {
        let clause = clause.into();
        if !clause.trim().is_empty() {
            self.clauses.push(clause.trim().to_string());
        }
        self
    }

    pub fn push_if(&mut self, condition: bool, clause: impl FnOnce() -> String) -> &mut Self {
        if condition {
            self.push(clause());
        }
        self
    }

    pub fn push_opt(&mut self, clause: Option<String>) -> &mut Self {
        if let Some(clause) = clause {
            self.push(clause);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn render(&self) -> String {
        self.clauses.join(" ")
    }
}

/// `High` / `Moderate` / `Low`, or `—` without a prediction.
pub fn move_probability_label(ml: Option<&MlPrediction>) -> &'static str {
    match ml.map(MlPrediction::move_probability) {
        Some(p) if p >= HIGH_MOVE_PROBABILITY => "High",
        Some(p) if p >= MODERATE_MOVE_PROBABILITY => "Moderate",
        Some(_) => "Low",
        None => "—",
    }
}

pub fn ml_sentence(ml: &MlPrediction) -> String {
    let direction = match ml.direction {
        Direction::Bullish => "leaning bullish",
        Direction::Bearish => "leaning bearish",
        Direction::Neutral => "with no directional lean",
    };
    let strength = match ml.signal_strength {
        SignalStrength::Strong => " (strong signal)",
        SignalStrength::Moderate => " (moderate signal)",
        SignalStrength::Weak => " (weak signal)",
        SignalStrength::None => "",
    };
    format!(
        "ML model gives a {:.0}% chance of a significant move, {} at {:.0}% direction confidence{}.",
        ml.move_probability() * 100.0,
        direction,
        ml.direction_confidence() * 100.0,
        strength
    )
}

/// Dealer-positioning read relative to the GEX flip. Above the flip dealers
/// dampen moves, below it they amplify them; the consequence is phrased for
/// the direction of the gap.
pub fn gex_zone_sentence(price: f64, flip: f64, gap: GapDirection) -> String {
    let flip_label = format_price(flip);
    if price > flip {
        let consequence = match gap {
            GapDirection::Up => "the gap may fade as dealers sell into strength",
            GapDirection::Down => "the gap down may get bought as dealers buy weakness",
            GapDirection::Flat => "dealer hedging dampens moves",
        };
        format!(
            "Price is above the GEX flip at {}: a mean-reversion zone where {}.",
            flip_label, consequence
        )
    } else if price < flip {
        let consequence = match gap {
            GapDirection::Up => "the gap can extend as dealers chase strength",
            GapDirection::Down => "the selloff can extend as dealers sell into weakness",
            GapDirection::Flat => "dealer hedging amplifies moves",
        };
        format!(
            "Price is below the GEX flip at {}: a trend zone where {}.",
            flip_label, consequence
        )
    } else {
        format!(
            "Price is sitting on the GEX flip at {}; expect chop until it picks a side.",
            flip_label
        )
    }
}

fn distance_pct(price: f64, level: f64) -> Option<f64> {
    if price > 0.0 {
        Some((level - price).abs() / price * 100.0)
    } else {
        None
    }
}

/// Call/put walls within 2% of price.
pub fn wall_proximity_sentences(price: f64, levels: &Levels) -> Vec<String> {
    let walls = [
        (levels.call_wall(), CALL_WALL, "expect resistance"),
        (levels.put_wall(), PUT_WALL, "expect support"),
    ];
    walls
        .into_iter()
        .filter_map(|(wall, name, reaction)| {
            let wall = wall?;
            let distance = distance_pct(price, wall)?;
            (distance <= NEAR_WALL_PCT).then(|| {
                format!(
                    "{} at {} is close to price ({:.1}% away), {}.",
                    name,
                    format_price(wall),
                    distance,
                    reaction
                )
            })
        })
        .collect()
}

pub fn gap_sentence(ticker: &str, price: f64, gap: &Gap) -> String {
    let change = format_signed_pct(gap.change_percent);
    let at = format_price(price);
    match (gap.direction, gap.is_big) {
        (GapDirection::Up, true) => {
            format!("{} is gapping up sharply ({}) pre-market at {}.", ticker, change, at)
        }
        (GapDirection::Up, false) => {
            format!("{} is gapping up ({}) pre-market at {}.", ticker, change, at)
        }
        (GapDirection::Down, true) => {
            format!("{} is gapping down sharply ({}) pre-market at {}.", ticker, change, at)
        }
        (GapDirection::Down, false) => {
            format!("{} is gapping down ({}) pre-market at {}.", ticker, change, at)
        }
        (GapDirection::Flat, _) => {
            format!("{} is little changed pre-market ({}) at {}.", ticker, change, at)
        }
    }
}

pub fn approach_sentence(gap: &Gap) -> String {
    match (gap.is_big, gap.direction) {
        (true, _) => concat!(
            "Big gaps often partially fill in the first 30 minutes. ",
            "Let the opening range form before chasing, and fade extremes into the walls."
        )
        .to_string(),
        (false, GapDirection::Up) | (false, GapDirection::Down) => {
            let side = if gap.is_up() { "higher" } else { "lower" };
            format!(
                "Look for continuation if the first 5-minute candle holds the gap {}; a move back through the prior close voids the setup.",
                side
            )
        }
        (false, GapDirection::Flat) => concat!(
            "No meaningful gap. ",
            "Trade the opening range breakout and let options flow confirm direction."
        )
        .to_string(),
    }
}

/// `Invalidated below $95.00 (Put Wall).` for longs, `above` for shorts.
///
/// Quotes the same level as the setup's stop, so the two never disagree.
pub fn invalidation_sentence(bias: ThesisBias, price: f64, levels: &Levels) -> Option<String> {
    let side = match bias {
        ThesisBias::Bullish => "below",
        ThesisBias::Bearish => "above",
        ThesisBias::Neutral | ThesisBias::Conflicting => return None,
    };
    stop_level(bias, price, levels).map(|stop| format!("Invalidated {} {}.", side, stop.label()))
}
