//! Market inputs produced by upstream collaborators.
//!
//! Every field coming off the wire is optional. Each stats struct has a
//! `normalize()` step that applies the defaults once, so the signal builders
//! only ever see fully populated values.

use serde::{Deserialize, Serialize};

const DEFAULT_RATIO: f64 = 50.0;

/// US equity trading session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketSession {
    PreMarket,
    Open,
    AfterHours,
    Closed,
}

impl MarketSession {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSession::PreMarket => "pre-market",
            MarketSession::Open => "open",
            MarketSession::AfterHours => "after-hours",
            MarketSession::Closed => "closed",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, MarketSession::Open)
    }
}

impl std::fmt::Display for MarketSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gamma and volume reference levels. Used read-only as price anchors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Levels {
    #[serde(default)]
    pub call_wall: Option<f64>,
    #[serde(default)]
    pub put_wall: Option<f64>,
    #[serde(default)]
    pub gex_flip: Option<f64>,
    #[serde(default)]
    pub max_pain: Option<f64>,
    #[serde(default)]
    pub vwap: Option<f64>,
}

impl Levels {
    pub fn call_wall(&self) -> Option<f64> {
        usable_level(self.call_wall)
    }

    pub fn put_wall(&self) -> Option<f64> {
        usable_level(self.put_wall)
    }

    pub fn gex_flip(&self) -> Option<f64> {
        usable_level(self.gex_flip)
    }

    pub fn max_pain(&self) -> Option<f64> {
        usable_level(self.max_pain)
    }

    pub fn vwap(&self) -> Option<f64> {
        usable_level(self.vwap)
    }
}

/// A price level of zero, a negative price or NaN carries no information.
fn usable_level(level: Option<f64>) -> Option<f64> {
    level.filter(|v| v.is_finite() && *v > 0.0)
}

fn finite_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}

/// Counts arrive as plain JSON numbers; fractions are truncated and anything
/// negative or non-finite counts as zero.
fn count_or_zero(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v >= 1.0 => v.trunc() as u64,
        _ => 0,
    }
}

/// Options flow aggregates for a single ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStats {
    #[serde(default)]
    pub call_ratio: Option<f64>,
    #[serde(default)]
    pub put_ratio: Option<f64>,
    #[serde(default)]
    pub net_delta_adjusted_flow: Option<f64>,
    #[serde(default)]
    pub sweep_ratio: Option<f64>,
    #[serde(default)]
    pub trade_count: Option<f64>,
    #[serde(default)]
    pub unusual_count: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowMetrics {
    pub call_ratio: f64,
    pub put_ratio: f64,
    pub net_delta_adjusted_flow: f64,
    pub sweep_ratio: f64,
    pub trade_count: u64,
    pub unusual_count: u64,
}

impl FlowStats {
    pub fn normalize(&self) -> FlowMetrics {
        FlowMetrics {
            call_ratio: finite_or(self.call_ratio, DEFAULT_RATIO),
            put_ratio: finite_or(self.put_ratio, DEFAULT_RATIO),
            net_delta_adjusted_flow: finite_or(self.net_delta_adjusted_flow, 0.0),
            sweep_ratio: finite_or(self.sweep_ratio, 0.0),
            trade_count: count_or_zero(self.trade_count),
            unusual_count: count_or_zero(self.unusual_count),
        }
    }
}

/// Upstream label for dark-pool positioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DarkPoolRegime {
    Accumulation,
    Distribution,
    Neutral,
    #[serde(other)]
    Unknown,
}

impl DarkPoolRegime {
    pub fn label(&self) -> &'static str {
        match self {
            DarkPoolRegime::Accumulation => "Accumulation",
            DarkPoolRegime::Distribution => "Distribution",
            DarkPoolRegime::Neutral => "Neutral",
            DarkPoolRegime::Unknown => "Unknown",
        }
    }
}

/// Dark-pool print aggregates for a single ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DarkPoolStats {
    #[serde(default)]
    pub print_count: Option<f64>,
    #[serde(default)]
    pub bullish_pct: Option<f64>,
    #[serde(default)]
    pub bearish_pct: Option<f64>,
    #[serde(default)]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub regime: Option<DarkPoolRegime>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DarkPoolMetrics {
    pub print_count: u64,
    pub bullish_pct: f64,
    pub bearish_pct: f64,
    pub total_value: f64,
    pub regime: Option<DarkPoolRegime>,
}

impl DarkPoolStats {
    pub fn normalize(&self) -> DarkPoolMetrics {
        DarkPoolMetrics {
            print_count: count_or_zero(self.print_count),
            bullish_pct: finite_or(self.bullish_pct, DEFAULT_RATIO),
            bearish_pct: finite_or(self.bearish_pct, DEFAULT_RATIO),
            total_value: finite_or(self.total_value, 0.0),
            regime: self.regime,
        }
    }
}

/// A headline as delivered by the news feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sentiment: Option<String>,
}

impl NewsItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            sentiment: None,
        }
    }

    pub fn with_sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.sentiment = Some(sentiment.into());
        self
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// Relative-strength regime against the broad market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsRegime {
    StrongOutperform,
    Outperform,
    Underperform,
    StrongUnderperform,
    #[default]
    #[serde(other)]
    Inline,
}

impl RsRegime {
    pub fn label(&self) -> &'static str {
        match self {
            RsRegime::StrongOutperform => "Strong outperform",
            RsRegime::Outperform => "Outperform",
            RsRegime::Inline => "Inline",
            RsRegime::Underperform => "Underperform",
            RsRegime::StrongUnderperform => "Strong underperform",
        }
    }
}

/// Ticker performance relative to SPY and QQQ, in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeStrengthStats {
    #[serde(default)]
    pub rs_vs_spy: Option<f64>,
    #[serde(default)]
    pub rs_vs_qqq: Option<f64>,
    #[serde(default)]
    pub regime: Option<RsRegime>,
    #[serde(default)]
    pub ticker_change: Option<f64>,
    #[serde(default)]
    pub spy_change: Option<f64>,
    #[serde(default)]
    pub qqq_change: Option<f64>,
    #[serde(default)]
    pub session: Option<MarketSession>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeStrengthMetrics {
    pub rs_vs_spy: f64,
    pub rs_vs_qqq: f64,
    pub regime: RsRegime,
    pub ticker_change: f64,
    pub spy_change: f64,
    pub qqq_change: f64,
    pub session: Option<MarketSession>,
}

impl RelativeStrengthStats {
    pub fn normalize(&self) -> RelativeStrengthMetrics {
        RelativeStrengthMetrics {
            rs_vs_spy: finite_or(self.rs_vs_spy, 0.0),
            rs_vs_qqq: finite_or(self.rs_vs_qqq, 0.0),
            regime: self.regime.unwrap_or_default(),
            ticker_change: finite_or(self.ticker_change, 0.0),
            spy_change: finite_or(self.spy_change, 0.0),
            qqq_change: finite_or(self.qqq_change, 0.0),
            session: self.session,
        }
    }
}

/// Direction called by the ML model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Bullish,
    Bearish,
    #[default]
    #[serde(other)]
    Neutral,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStrength {
    Strong,
    Moderate,
    Weak,
    #[default]
    #[serde(other)]
    None,
}

/// Output of the upstream move-prediction model. Missing fields read as no
/// signal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MlPrediction {
    pub has_signal: bool,
    pub direction: Direction,
    pub move_probability: f64,
    pub direction_confidence: f64,
    pub signal_strength: SignalStrength,
}

impl MlPrediction {
    pub fn move_probability(&self) -> f64 {
        clamp_unit(self.move_probability)
    }

    pub fn direction_confidence(&self) -> f64 {
        clamp_unit(self.direction_confidence)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Everything the engine needs for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub ticker: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub change_percent: f64,
    #[serde(default)]
    pub flow_stats: FlowStats,
    #[serde(default)]
    pub dark_pool_stats: DarkPoolStats,
    #[serde(default)]
    pub news_items: Vec<NewsItem>,
    #[serde(default)]
    pub relative_strength: Option<RelativeStrengthStats>,
    #[serde(default)]
    pub levels: Levels,
    #[serde(default)]
    pub market_session: Option<MarketSession>,
    #[serde(default)]
    pub ml_prediction: Option<MlPrediction>,
}

impl MarketSnapshot {
    pub fn new(ticker: impl Into<String>, price: f64, session: MarketSession) -> Self {
        Self {
            ticker: ticker.into(),
            price,
            change_percent: 0.0,
            flow_stats: FlowStats::default(),
            dark_pool_stats: DarkPoolStats::default(),
            news_items: Vec::new(),
            relative_strength: None,
            levels: Levels::default(),
            market_session: Some(session),
            ml_prediction: None,
        }
    }

    pub fn with_change_percent(mut self, change_percent: f64) -> Self {
        self.change_percent = change_percent;
        self
    }

    pub fn with_flow(mut self, flow_stats: FlowStats) -> Self {
        self.flow_stats = flow_stats;
        self
    }

    pub fn with_dark_pool(mut self, dark_pool_stats: DarkPoolStats) -> Self {
        self.dark_pool_stats = dark_pool_stats;
        self
    }

    pub fn with_news(mut self, news_items: Vec<NewsItem>) -> Self {
        self.news_items = news_items;
        self
    }

    pub fn with_relative_strength(mut self, relative_strength: RelativeStrengthStats) -> Self {
        self.relative_strength = Some(relative_strength);
        self
    }

    pub fn with_levels(mut self, levels: Levels) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_ml_prediction(mut self, prediction: MlPrediction) -> Self {
        self.ml_prediction = Some(prediction);
        self
    }

    /// Session to evaluate under. A snapshot without one is treated as closed.
    pub fn session(&self) -> MarketSession {
        self.market_session.unwrap_or(MarketSession::Closed)
    }

    pub fn price(&self) -> f64 {
        finite_or(Some(self.price), 0.0)
    }

    pub fn change_percent(&self) -> f64 {
        finite_or(Some(self.change_percent), 0.0)
    }
}
