//! Engine facade: builds the four domain signals and hands them to the
//! thesis synthesizer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ConfluenceConfig;
use crate::models::market::MarketSnapshot;
use crate::models::signal::{Signal, SignalSet};
use crate::models::thesis::UnifiedThesis;
use crate::signals::confluence::ConfluenceSummary;
use crate::signals::dark_pool::build_dark_pool_signal;
use crate::signals::flow::build_flow_signal;
use crate::signals::news::build_news_signal;
use crate::signals::relative_strength::build_relative_strength_signal;
use crate::thesis::synthesizer::{synthesize_thesis, ThesisInput};

/// Everything the dashboard renders for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfluenceReport {
    pub signals: Vec<Signal>,
    pub confluence: ConfluenceSummary,
    pub thesis: UnifiedThesis,
}

#[derive(Debug, Clone, Default)]
pub struct ConfluenceEngine {
    config: ConfluenceConfig,
}

impl ConfluenceEngine {
    pub fn new(config: ConfluenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConfluenceConfig {
        &self.config
    }

    /// Build the Flow, Dark Pool, News and Relative Strength signals.
    pub fn build_signals(&self, snapshot: &MarketSnapshot) -> SignalSet {
        let session = snapshot.session();
        let ticker = snapshot.ticker.as_str();

        SignalSet {
            flow: build_flow_signal(ticker, &snapshot.flow_stats, session),
            dark_pool: build_dark_pool_signal(ticker, &snapshot.dark_pool_stats, session),
            news: build_news_signal(ticker, &snapshot.news_items, &self.config.news_keywords),
            relative_strength: build_relative_strength_signal(
                ticker,
                snapshot.relative_strength.as_ref(),
                session,
            ),
        }
    }

    pub fn synthesize(&self, snapshot: &MarketSnapshot, signals: &SignalSet) -> UnifiedThesis {
        synthesize_thesis(&ThesisInput {
            ticker: &snapshot.ticker,
            price: snapshot.price(),
            change_percent: snapshot.change_percent(),
            session: snapshot.session(),
            signals,
            levels: &snapshot.levels,
            ml: snapshot.ml_prediction.as_ref(),
        })
    }

    /// Full evaluation: signals, tally and thesis.
    pub fn evaluate(&self, snapshot: &MarketSnapshot) -> ConfluenceReport {
        let signals = self.build_signals(snapshot);
        let confluence = ConfluenceSummary::from_signals(signals.iter());
        let thesis = self.synthesize(snapshot, &signals);

        debug!(
            ticker = %snapshot.ticker,
            session = %snapshot.session(),
            bullish = confluence.bullish,
            bearish = confluence.bearish,
            bias = %thesis.bias,
            "Evaluated confluence"
        );

        ConfluenceReport {
            signals: signals.into_vec(),
            confluence,
            thesis,
        }
    }
}
