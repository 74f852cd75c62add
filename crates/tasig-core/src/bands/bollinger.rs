//! Bollinger Bands implementation.

use crate::statistical::RollingStats;
use tasig_api::BollingerConfig;
use tasig_spi::{PriceTable, Result, TableStage};

/// Bollinger Bands output series.
#[derive(Debug, Clone)]
pub struct BollingerOutput {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Bollinger Bands.
///
/// - Middle band: rolling mean of close
/// - Upper band: middle + num_std * rolling sample std
/// - Lower band: middle - num_std * rolling sample std
///
/// The rolling std is an intermediate and is not exposed as a column. The
/// first `window - 1` rows of every band are NaN; callers decide whether to
/// drop them.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    config: BollingerConfig,
    stats: RollingStats,
}

impl BollingerBands {
    pub fn new(config: BollingerConfig) -> Result<Self> {
        let stats = RollingStats::new(config.window)?;
        Ok(Self { config, stats })
    }

    /// Calculate the three bands from a closing-price series.
    pub fn calculate(&self, close: &[f64]) -> BollingerOutput {
        let middle = self.stats.mean(close);
        let std = self.stats.std(close);

        let upper = middle
            .iter()
            .zip(std.iter())
            .map(|(m, s)| m + self.config.num_std * s)
            .collect();
        let lower = middle
            .iter()
            .zip(std.iter())
            .map(|(m, s)| m - self.config.num_std * s)
            .collect();

        BollingerOutput { upper, middle, lower }
    }
}

impl TableStage for BollingerBands {
    fn name(&self) -> &str {
        "BollingerBands"
    }

    fn output_columns(&self) -> Vec<String> {
        vec![
            self.config.upper_column.clone(),
            self.config.middle_column.clone(),
            self.config.lower_column.clone(),
        ]
    }

    fn apply(&self, table: &mut PriceTable) -> Result<()> {
        let out = self.calculate(table.close());
        table.insert_column(self.config.upper_column.clone(), out.upper)?;
        table.insert_column(self.config.middle_column.clone(), out.middle)?;
        table.insert_column(self.config.lower_column.clone(), out.lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_ordering_holds_wherever_defined() {
        let bb = BollingerBands::new(BollingerConfig::new(5, 2.0)).unwrap();
        let close: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 4.0).collect();
        let out = bb.calculate(&close);

        for i in 0..close.len() {
            if out.middle[i].is_nan() {
                assert!(out.upper[i].is_nan());
                assert!(out.lower[i].is_nan());
            } else {
                assert!(out.lower[i] <= out.middle[i]);
                assert!(out.middle[i] <= out.upper[i]);
            }
        }
    }

    #[test]
    fn warm_up_rows_are_nan() {
        let bb = BollingerBands::new(BollingerConfig::default()).unwrap();
        let close: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let out = bb.calculate(&close);

        for i in 0..19 {
            assert!(out.middle[i].is_nan());
        }
        assert!(!out.middle[19].is_nan());
    }

    #[test]
    fn flat_series_collapses_the_bands() {
        let bb = BollingerBands::new(BollingerConfig::new(4, 2.0)).unwrap();
        let out = bb.calculate(&[50.0; 8]);
        for i in 3..8 {
            assert!((out.upper[i] - 50.0).abs() < 1e-12);
            assert!((out.lower[i] - 50.0).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_window_rejected() {
        assert!(BollingerBands::new(BollingerConfig::new(0, 2.0)).is_err());
    }
}
