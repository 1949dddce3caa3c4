use serde::{Deserialize, Serialize};

/// Directional read of a single data domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
    NoData,
}

impl Bias {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Bullish => "BULLISH",
            Bias::Bearish => "BEARISH",
            Bias::Neutral => "NEUTRAL",
            Bias::NoData => "NO_DATA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    None,
    Low,
    Medium,
    High,
}

/// Data domain a signal was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    #[serde(rename = "Options Flow")]
    OptionsFlow,
    #[serde(rename = "Dark Pool")]
    DarkPool,
    #[serde(rename = "News Sentiment")]
    NewsSentiment,
    #[serde(rename = "Relative Strength")]
    RelativeStrength,
}

impl SignalKind {
    pub fn label(&self) -> &'static str {
        match self {
            SignalKind::OptionsFlow => "Options Flow",
            SignalKind::DarkPool => "Dark Pool",
            SignalKind::NewsSentiment => "News Sentiment",
            SignalKind::RelativeStrength => "Relative Strength",
        }
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One domain's contribution to the thesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub label: SignalKind,
    pub bias: Bias,
    pub summary: String,
    pub details: Vec<String>,
    pub confidence: Confidence,
}

impl Signal {
    pub fn new(
        label: SignalKind,
        bias: Bias,
        confidence: Confidence,
        summary: String,
        details: Vec<String>,
    ) -> Self {
        // NO_DATA never carries confidence
        let confidence = if bias == Bias::NoData {
            Confidence::None
        } else {
            confidence
        };
        Self {
            label,
            bias,
            summary,
            details,
            confidence,
        }
    }

    pub fn no_data(label: SignalKind, summary: impl Into<String>) -> Self {
        Self {
            label,
            bias: Bias::NoData,
            summary: summary.into(),
            details: Vec::new(),
            confidence: Confidence::None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.bias != Bias::NoData
    }

    pub fn is_bullish(&self) -> bool {
        self.bias == Bias::Bullish
    }

    pub fn is_bearish(&self) -> bool {
        self.bias == Bias::Bearish
    }

    /// Active and leaning one way or the other.
    pub fn is_directional(&self) -> bool {
        self.is_bullish() || self.is_bearish()
    }
}

/// The four domain signals in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSet {
    pub flow: Signal,
    pub dark_pool: Signal,
    pub news: Signal,
    pub relative_strength: Signal,
}

impl SignalSet {
    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        [&self.flow, &self.dark_pool, &self.news, &self.relative_strength].into_iter()
    }

    pub fn bullish_count(&self) -> usize {
        self.iter().filter(|s| s.is_active() && s.is_bullish()).count()
    }

    pub fn bearish_count(&self) -> usize {
        self.iter().filter(|s| s.is_active() && s.is_bearish()).count()
    }

    pub fn into_vec(self) -> Vec<Signal> {
        vec![self.flow, self.dark_pool, self.news, self.relative_strength]
    }
}
