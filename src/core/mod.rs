//! Service surface around the engine

pub mod http;

pub use http::*;
