//! True range and Average True Range.

use crate::moving_averages::Ewma;
use tasig_api::AtrConfig;
use tasig_spi::{PriceTable, Result, TableStage};

/// Per-bar true range against the previous close.
///
/// `tr[t] = max(high[t], close[t-1]) - min(low[t], close[t-1])`. The first
/// bar has no prior close, so `tr[0]` is NaN. The prior close, never the
/// same-bar close: shifting this by one breaks the causal alignment every
/// ATR consumer relies on.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    let n = high.len();
    if n == 0 {
        return vec![];
    }

    let mut tr = Vec::with_capacity(n);
    tr.push(f64::NAN);
    for t in 1..n {
        let prev_close = close[t - 1];
        tr.push(high[t].max(prev_close) - low[t].min(prev_close));
    }
    tr
}

/// Average True Range.
///
/// EWMA of the true range with `min_periods` equal to the span, so the
/// column stays NaN until a full span of true-range observations exists.
/// The true-range buffer is internal; only the smoothed column is appended,
/// aligned to the table's own timestamp index.
#[derive(Debug, Clone)]
pub struct Atr {
    config: AtrConfig,
    smoother: Ewma,
}

impl Atr {
    pub fn new(config: AtrConfig) -> Result<Self> {
        let smoother = Ewma::with_min_periods(config.span, config.span)?;
        Ok(Self { config, smoother })
    }

    /// Smoothed true range, aligned to the input series.
    pub fn calculate(&self, high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
        self.smoother.calculate(&true_range(high, low, close))
    }
}

impl TableStage for Atr {
    fn name(&self) -> &str {
        "Atr"
    }

    fn output_columns(&self) -> Vec<String> {
        vec![self.config.output.clone()]
    }

    fn apply(&self, table: &mut PriceTable) -> Result<()> {
        let values = self.calculate(table.high(), table.low(), table.close());
        table.insert_column(self.config.output.clone(), values)
    }
}
