//! Volatility envelope indicators.

mod bollinger;
mod keltner;

pub use bollinger::{BollingerBands, BollingerOutput};
pub use keltner::{KeltnerChannels, KeltnerOutput};
