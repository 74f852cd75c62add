//! Exponentially-weighted moving averages.

use tasig_api::EwmaColumnConfig;
use tasig_spi::{PriceTable, Result, StageError, TableStage};

/// Exponentially weighted moving average.
///
/// Uses the unadjusted recursive form with decay α = 2 / (span + 1):
/// `y[0] = x[0]`, `y[t] = α·x[t] + (1 − α)·y[t−1]`. Downstream MACD, ATR,
/// and Keltner values depend on this exact convention. A span of 1 gives
/// α = 1 and echoes the input.
#[derive(Debug, Clone)]
pub struct Ewma {
    span: usize,
    alpha: f64,
    min_periods: usize,
}

impl Ewma {
    /// EWMA defined from the first observation.
    pub fn new(span: usize) -> Result<Self> {
        Self::with_min_periods(span, 1)
    }

    /// EWMA whose output stays NaN until `min_periods` observations are seen.
    pub fn with_min_periods(span: usize, min_periods: usize) -> Result<Self> {
        if span == 0 {
            return Err(StageError::InvalidParameter {
                name: "span".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        if min_periods == 0 {
            return Err(StageError::InvalidParameter {
                name: "min_periods".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(Self {
            span,
            alpha: 2.0 / (span as f64 + 1.0),
            min_periods,
        })
    }

    pub fn span(&self) -> usize {
        self.span
    }

    /// Smooth a series.
    ///
    /// NaN inputs emit NaN without touching the smoother state or the
    /// observation count, so a series with a warm-up gap (like true range)
    /// seeds from its first defined value.
    pub fn calculate(&self, data: &[f64]) -> Vec<f64> {
        let mut out = Vec::with_capacity(data.len());
        let mut state: Option<f64> = None;
        let mut seen = 0usize;

        for &x in data {
            if x.is_nan() {
                out.push(f64::NAN);
                continue;
            }
            let y = match state {
                None => x,
                Some(prev) => self.alpha * x + (1.0 - self.alpha) * prev,
            };
            state = Some(y);
            seen += 1;
            out.push(if seen >= self.min_periods { y } else { f64::NAN });
        }

        out
    }
}

/// Table stage smoothing one column into another.
///
/// Reads the configured source (closing price by default) and appends the
/// EWMA under the configured output name. The standard pipeline uses two of
/// these to produce the `ewma_fast`/`ewma_slow` crossover inputs.
#[derive(Debug, Clone)]
pub struct EwmaColumn {
    config: EwmaColumnConfig,
    ewma: Ewma,
}

impl EwmaColumn {
    pub fn new(config: EwmaColumnConfig) -> Result<Self> {
        let ewma = match config.min_periods {
            Some(m) => Ewma::with_min_periods(config.span, m)?,
            None => Ewma::new(config.span)?,
        };
        Ok(Self { config, ewma })
    }
}

impl TableStage for EwmaColumn {
    fn name(&self) -> &str {
        "EwmaColumn"
    }

    fn output_columns(&self) -> Vec<String> {
        vec![self.config.output.clone()]
    }

    fn apply(&self, table: &mut PriceTable) -> Result<()> {
        let values = match &self.config.source {
            Some(name) => self.ewma.calculate(table.require_column(name)?),
            None => self.ewma.calculate(table.close()),
        };
        table.insert_column(self.config.output.clone(), values)
    }
}
