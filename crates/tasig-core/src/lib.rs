//! Core Indicator Implementations
//!
//! Rolling-window and exponentially-weighted primitives plus the indicator
//! stages built on them, organized by category.

pub mod bands;
pub mod macd;
pub mod moving_averages;
pub mod statistical;
pub mod volatility;

pub use bands::{BollingerBands, BollingerOutput, KeltnerChannels, KeltnerOutput};
pub use macd::{Macd, MacdSignal};
pub use moving_averages::{Ewma, EwmaColumn};
pub use statistical::RollingStats;
pub use volatility::{true_range, Atr};
