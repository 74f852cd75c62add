//! Volatility indicators.

mod atr;

pub use atr::{true_range, Atr};
