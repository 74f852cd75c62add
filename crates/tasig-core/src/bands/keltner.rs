//! Keltner Channels implementation.

use crate::moving_averages::Ewma;
use crate::volatility::Atr;
use tasig_api::KeltnerConfig;
use tasig_spi::{PriceTable, Result, TableStage};

/// Keltner Channels output series, including the ATR they are built on.
#[derive(Debug, Clone)]
pub struct KeltnerOutput {
    pub atr: Vec<f64>,
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Keltner Channels.
///
/// - Middle: EWMA of close with `min_periods` equal to the span
/// - Upper: middle + multiplier * ATR
/// - Lower: middle - multiplier * ATR
///
/// Appends the ATR column too, so a chained squeeze detector (and anything
/// else downstream) can read it without recomputing. Bollinger columns
/// already on the table are left untouched.
#[derive(Debug, Clone)]
pub struct KeltnerChannels {
    config: KeltnerConfig,
    atr: Atr,
    ewma: Ewma,
}

impl KeltnerChannels {
    pub fn new(config: KeltnerConfig) -> Result<Self> {
        let atr = Atr::new(config.atr.clone())?;
        let ewma = Ewma::with_min_periods(config.span, config.span)?;
        Ok(Self { config, atr, ewma })
    }

    /// Calculate the channel and its ATR from raw OHLC series.
    pub fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> KeltnerOutput {
        let atr = self.atr.calculate(high, low, close);
        let middle = self.ewma.calculate(close);

        let n = close.len();
        let mut upper = Vec::with_capacity(n);
        let mut lower = Vec::with_capacity(n);
        for i in 0..n {
            if middle[i].is_nan() || atr[i].is_nan() {
                upper.push(f64::NAN);
                lower.push(f64::NAN);
            } else {
                upper.push(middle[i] + self.config.multiplier * atr[i]);
                lower.push(middle[i] - self.config.multiplier * atr[i]);
            }
        }

        KeltnerOutput { atr, upper, middle, lower }
    }
}

impl TableStage for KeltnerChannels {
    fn name(&self) -> &str {
        "KeltnerChannels"
    }

    fn output_columns(&self) -> Vec<String> {
        vec![
            self.config.atr.output.clone(),
            self.config.upper_column.clone(),
            self.config.middle_column.clone(),
            self.config.lower_column.clone(),
        ]
    }

    fn apply(&self, table: &mut PriceTable) -> Result<()> {
        let out = self.calculate(table.high(), table.low(), table.close());
        table.insert_column(self.config.atr.output.clone(), out.atr)?;
        table.insert_column(self.config.upper_column.clone(), out.upper)?;
        table.insert_column(self.config.middle_column.clone(), out.middle)?;
        table.insert_column(self.config.lower_column.clone(), out.lower)
    }
}
