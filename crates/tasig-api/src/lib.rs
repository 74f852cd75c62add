//! Indicator configuration types.

mod config;

pub use config::*;
