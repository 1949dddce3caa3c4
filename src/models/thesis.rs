use serde::{Deserialize, Serialize};

use crate::models::market::Direction;

/// Fused directional verdict.
///
/// `Conflicting` is a display-only state for the dashboard. The synthesizer
/// never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThesisBias {
    Bullish,
    Bearish,
    Neutral,
    Conflicting,
}

impl ThesisBias {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThesisBias::Bullish => "BULLISH",
            ThesisBias::Bearish => "BEARISH",
            ThesisBias::Neutral => "NEUTRAL",
            ThesisBias::Conflicting => "CONFLICTING",
        }
    }

    /// Title-case label used in headlines.
    pub fn label(&self) -> &'static str {
        match self {
            ThesisBias::Bullish => "Bullish",
            ThesisBias::Bearish => "Bearish",
            ThesisBias::Neutral => "Neutral",
            ThesisBias::Conflicting => "Conflicting",
        }
    }

    pub fn is_directional(&self) -> bool {
        matches!(self, ThesisBias::Bullish | ThesisBias::Bearish)
    }
}

impl From<Direction> for ThesisBias {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Bullish => ThesisBias::Bullish,
            Direction::Bearish => ThesisBias::Bearish,
            Direction::Neutral => ThesisBias::Neutral,
        }
    }
}

impl std::fmt::Display for ThesisBias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry, targets and stop rendered as price labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeSetup {
    pub entry: Option<String>,
    pub targets: Vec<String>,
    pub stop: Option<String>,
}

impl TradeSetup {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none() && self.targets.is_empty() && self.stop.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedThesis {
    pub bias: ThesisBias,
    pub one_liner: String,
    pub body: String,
    pub setup: TradeSetup,
    pub risk: Option<String>,
}
