//! Small helpers shared across the engine layers.

pub mod format;

pub use format::*;
