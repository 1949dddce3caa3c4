//! Bull/bear tally shown next to the signal cards.

use serde::{Deserialize, Serialize};

use crate::models::signal::{Bias, Signal};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfluenceSummary {
    pub bullish: usize,
    pub bearish: usize,
    pub neutral: usize,
    pub inactive: usize,
}

impl ConfluenceSummary {
    pub fn from_signals<'a>(signals: impl IntoIterator<Item = &'a Signal>) -> Self {
        signals
            .into_iter()
            .fold(Self::default(), |mut acc, signal| {
                match signal.bias {
                    Bias::Bullish => acc.bullish += 1,
                    Bias::Bearish => acc.bearish += 1,
                    Bias::Neutral => acc.neutral += 1,
                    Bias::NoData => acc.inactive += 1,
                }
                acc
            })
    }

    pub fn active(&self) -> usize {
        self.bullish + self.bearish + self.neutral
    }

    /// `2 bull / 1 bear`
    pub fn label(&self) -> String {
        format!("{} bull / {} bear", self.bullish, self.bearish)
    }
}
