//! Shared data models spanning the engine layers.

pub mod market;
pub mod session;
pub mod signal;
pub mod thesis;

pub use market::{
    DarkPoolMetrics, DarkPoolRegime, DarkPoolStats, Direction, FlowMetrics, FlowStats, Levels,
    MarketSession, MarketSnapshot, MlPrediction, NewsItem, RelativeStrengthMetrics,
    RelativeStrengthStats, RsRegime, SignalStrength,
};
pub use signal::{Bias, Confidence, Signal, SignalKind, SignalSet};
pub use thesis::{ThesisBias, TradeSetup, UnifiedThesis};
