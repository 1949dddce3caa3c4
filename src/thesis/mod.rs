//! Thesis synthesis: bias fusion, narrative and trade setup.

pub mod gap;
pub mod narrative;
pub mod setup;
pub mod synthesizer;

pub use gap::{Gap, GapDirection};
pub use narrative::Narrative;
pub use setup::{calculate_setup, EntryAnchor, PriceLevel};
pub use synthesizer::{open_bias, pre_market_bias, synthesize_thesis, ThesisInput};
