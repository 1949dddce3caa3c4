//! Per-domain signal builders and the engine facade.

pub mod confluence;
pub mod dark_pool;
pub mod engine;
pub mod flow;
pub mod news;
pub mod relative_strength;

pub use confluence::ConfluenceSummary;
pub use dark_pool::build_dark_pool_signal;
pub use engine::{ConfluenceEngine, ConfluenceReport};
pub use flow::build_flow_signal;
pub use news::{build_news_signal, score_headlines, KeywordScore};
pub use relative_strength::build_relative_strength_signal;
