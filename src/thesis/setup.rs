//! Entry / target / stop derivation from gamma levels.
//!
//! Targets always sit strictly on the profitable side of price and stops on
//! the losing side. Absent levels are dropped, never padded.

use crate::common::level_label;
use crate::models::market::Levels;
use crate::models::thesis::{ThesisBias, TradeSetup};

pub const MAX_TARGETS: usize = 2;
const PULLBACK_OFFSET_PCT: f64 = 0.5;

pub const CALL_WALL: &str = "Call Wall";
pub const PUT_WALL: &str = "Put Wall";
pub const GEX_FLIP: &str = "GEX Flip";
pub const VWAP: &str = "VWAP";

/// How to place the entry when VWAP is not available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryAnchor {
    /// Enter at the current price.
    Spot,
    /// Wait for a pullback (bullish) or bounce (bearish) of this many percent.
    Offset(f64),
}

impl EntryAnchor {
    pub fn pre_market() -> Self {
        EntryAnchor::Offset(PULLBACK_OFFSET_PCT)
    }
}

/// A named price level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLevel {
    pub price: f64,
    pub name: &'static str,
}

impl PriceLevel {
    pub fn label(&self) -> String {
        level_label(self.price, self.name)
    }
}

fn named(price: Option<f64>, name: &'static str) -> Option<PriceLevel> {
    price.map(|price| PriceLevel { price, name })
}

/// Profit targets for `bias`, nearest first.
pub fn target_levels(bias: ThesisBias, price: f64, levels: &Levels) -> Vec<PriceLevel> {
    let candidates = match bias {
        ThesisBias::Bullish => [
            named(levels.call_wall(), CALL_WALL),
            named(levels.gex_flip(), GEX_FLIP),
        ],
        ThesisBias::Bearish => [
            named(levels.put_wall(), PUT_WALL),
            named(levels.gex_flip(), GEX_FLIP),
        ],
        ThesisBias::Neutral | ThesisBias::Conflicting => return Vec::new(),
    };

    let mut targets: Vec<PriceLevel> = Vec::with_capacity(MAX_TARGETS);
    for level in candidates.into_iter().flatten() {
        let profitable = match bias {
            ThesisBias::Bullish => level.price > price,
            _ => level.price < price,
        };
        if profitable && !targets.iter().any(|t| t.price == level.price) {
            targets.push(level);
        }
    }
    targets.sort_by(|a, b| {
        (a.price - price)
            .abs()
            .total_cmp(&(b.price - price).abs())
    });
    targets.truncate(MAX_TARGETS);
    targets
}

/// Stop level: the opposite wall, falling back to the GEX flip.
pub fn stop_level(bias: ThesisBias, price: f64, levels: &Levels) -> Option<PriceLevel> {
    let wall = match bias {
        ThesisBias::Bullish => named(levels.put_wall(), PUT_WALL),
        ThesisBias::Bearish => named(levels.call_wall(), CALL_WALL),
        ThesisBias::Neutral | ThesisBias::Conflicting => return None,
    };

    [wall, named(levels.gex_flip(), GEX_FLIP)]
        .into_iter()
        .flatten()
        .find(|level| match bias {
            ThesisBias::Bullish => level.price < price,
            _ => level.price > price,
        })
}

pub fn entry_label(
    bias: ThesisBias,
    price: f64,
    levels: &Levels,
    anchor: EntryAnchor,
) -> Option<String> {
    if !bias.is_directional() {
        return None;
    }
    if let Some(vwap) = levels.vwap() {
        return Some(level_label(vwap, VWAP));
    }
    if !(price.is_finite() && price > 0.0) {
        return None;
    }
    let label = match (anchor, bias) {
        (EntryAnchor::Spot, _) => level_label(price, "current"),
        (EntryAnchor::Offset(pct), ThesisBias::Bullish) => {
            level_label(price * (1.0 - pct / 100.0), "pullback")
        }
        (EntryAnchor::Offset(pct), _) => level_label(price * (1.0 + pct / 100.0), "bounce"),
    };
    Some(label)
}

/// Derive the trade setup for a bias. Neutral theses get an empty setup.
pub fn calculate_setup(
    bias: ThesisBias,
    price: f64,
    levels: &Levels,
    anchor: EntryAnchor,
) -> TradeSetup {
    if !bias.is_directional() {
        return TradeSetup::empty();
    }

    TradeSetup {
        entry: entry_label(bias, price, levels, anchor),
        targets: target_levels(bias, price, levels)
            .iter()
            .map(PriceLevel::label)
            .collect(),
        stop: stop_level(bias, price, levels).map(|level| level.label()),
    }
}
