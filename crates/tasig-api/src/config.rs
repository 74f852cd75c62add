//! Indicator configuration types.
//!
//! One value object per stage: window sizes, spans, multipliers, and
//! column-name overrides with the documented defaults.

use serde::{Deserialize, Serialize};
use tasig_spi::columns;

// ============================================================================
// Smoothing
// ============================================================================

/// Generic EWMA column stage configuration.
///
/// Smooths `source` into `output` with span `span`. With `min_periods` unset
/// the output is defined from the first observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EwmaColumnConfig {
    pub span: usize,
    /// Observations required before output is defined (default: none).
    pub min_periods: Option<usize>,
    /// Source column; `None` reads the closing price.
    pub source: Option<String>,
    pub output: String,
}

impl EwmaColumnConfig {
    pub fn new(span: usize, output: impl Into<String>) -> Self {
        Self {
            span,
            min_periods: None,
            source: None,
            output: output.into(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_min_periods(mut self, min_periods: usize) -> Self {
        self.min_periods = Some(min_periods);
        self
    }

    /// Fast leg of the standard crossover pair (span 12).
    pub fn fast() -> Self {
        Self::new(12, columns::EWMA_FAST)
    }

    /// Slow leg of the standard crossover pair (span 26).
    pub fn slow() -> Self {
        Self::new(26, columns::EWMA_SLOW)
    }
}

// ============================================================================
// Volatility Envelopes
// ============================================================================

/// Bollinger Bands configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerConfig {
    pub window: usize,
    /// Standard-deviation multiplier for the band offsets.
    pub num_std: f64,
    pub upper_column: String,
    pub middle_column: String,
    pub lower_column: String,
}

impl BollingerConfig {
    pub fn new(window: usize, num_std: f64) -> Self {
        Self {
            window,
            num_std,
            ..Self::default()
        }
    }
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            window: 20,
            num_std: 2.0,
            upper_column: columns::BB_UPPER.to_string(),
            middle_column: columns::BB_MIDDLE.to_string(),
            lower_column: columns::BB_LOWER.to_string(),
        }
    }
}

/// Average True Range configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtrConfig {
    /// EWMA span; also the minimum-periods warm-up threshold.
    pub span: usize,
    pub output: String,
}

impl AtrConfig {
    pub fn new(span: usize) -> Self {
        Self {
            span,
            ..Self::default()
        }
    }
}

impl Default for AtrConfig {
    fn default() -> Self {
        Self {
            span: 20,
            output: columns::ATR.to_string(),
        }
    }
}

/// Keltner Channels configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeltnerConfig {
    /// EWMA span for the middle line.
    pub span: usize,
    /// ATR multiplier for the channel offsets.
    pub multiplier: f64,
    pub atr: AtrConfig,
    pub upper_column: String,
    pub middle_column: String,
    pub lower_column: String,
}

impl KeltnerConfig {
    pub fn new(span: usize, multiplier: f64) -> Self {
        Self {
            span,
            multiplier,
            atr: AtrConfig::new(span),
            ..Self::default()
        }
    }
}

impl Default for KeltnerConfig {
    fn default() -> Self {
        Self {
            span: 20,
            multiplier: 2.0,
            atr: AtrConfig::default(),
            upper_column: columns::KC_UPPER.to_string(),
            middle_column: columns::KC_MIDDLE.to_string(),
            lower_column: columns::KC_LOWER.to_string(),
        }
    }
}

// ============================================================================
// Momentum
// ============================================================================

/// MACD line configuration.
///
/// This pipeline defines the line as slow EWMA minus fast EWMA; see the
/// `Macd` stage docs for the sign convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdConfig {
    pub fast_span: usize,
    pub slow_span: usize,
    pub output: String,
}

impl MacdConfig {
    pub fn new(fast_span: usize, slow_span: usize) -> Self {
        Self {
            fast_span,
            slow_span,
            ..Self::default()
        }
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_span: 12,
            slow_span: 26,
            output: columns::MACD.to_string(),
        }
    }
}

/// MACD signal-line configuration.
///
/// The signal line is a simple rolling mean of the MACD line, not an EWMA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdSignalConfig {
    /// Rolling-mean window over the MACD line.
    pub lag: usize,
    pub source: String,
    pub signal_column: String,
    pub divergence_column: String,
}

impl MacdSignalConfig {
    pub fn new(lag: usize) -> Self {
        Self {
            lag,
            ..Self::default()
        }
    }
}

impl Default for MacdSignalConfig {
    fn default() -> Self {
        Self {
            lag: 9,
            source: columns::MACD.to_string(),
            signal_column: columns::MACD_SIGNAL.to_string(),
            divergence_column: columns::MACD_DIVERGENCE.to_string(),
        }
    }
}
