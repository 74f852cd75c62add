//! MACD line and signal-line stages.

use crate::moving_averages::Ewma;
use crate::statistical::RollingStats;
use tasig_api::{MacdConfig, MacdSignalConfig};
use tasig_spi::{PriceTable, Result, TableStage};

/// MACD line over the closing price.
///
/// Sign convention: this pipeline defines the line as **slow EWMA minus
/// fast EWMA**, the reverse of the textbook fast-minus-slow. The line is
/// therefore negative while the fast average is above the slow one, and
/// downstream divergence and crossover semantics follow this sign. Both
/// EWMAs are defined from the first observation (no warm-up threshold).
#[derive(Debug, Clone)]
pub struct Macd {
    config: MacdConfig,
    fast: Ewma,
    slow: Ewma,
}

impl Macd {
    pub fn new(config: MacdConfig) -> Result<Self> {
        let fast = Ewma::new(config.fast_span)?;
        let slow = Ewma::new(config.slow_span)?;
        Ok(Self { config, fast, slow })
    }

    /// Calculate the MACD line from a closing-price series.
    pub fn calculate(&self, close: &[f64]) -> Vec<f64> {
        let fast = self.fast.calculate(close);
        let slow = self.slow.calculate(close);
        slow.iter().zip(fast.iter()).map(|(s, f)| s - f).collect()
    }
}

impl TableStage for Macd {
    fn name(&self) -> &str {
        "Macd"
    }

    fn output_columns(&self) -> Vec<String> {
        vec![self.config.output.clone()]
    }

    fn apply(&self, table: &mut PriceTable) -> Result<()> {
        let values = self.calculate(table.close());
        table.insert_column(self.config.output.clone(), values)
    }
}

/// MACD signal line and divergence.
///
/// The signal line is a simple rolling mean of the MACD line (not an EWMA),
/// and the divergence is the MACD line minus its signal. Requires the MACD
/// column; fails with `MissingColumn` when run out of order.
#[derive(Debug, Clone)]
pub struct MacdSignal {
    config: MacdSignalConfig,
    stats: RollingStats,
}

impl MacdSignal {
    pub fn new(config: MacdSignalConfig) -> Result<Self> {
        let stats = RollingStats::new(config.lag)?;
        Ok(Self { config, stats })
    }
}

impl TableStage for MacdSignal {
    fn name(&self) -> &str {
        "MacdSignal"
    }

    fn output_columns(&self) -> Vec<String> {
        vec![
            self.config.signal_column.clone(),
            self.config.divergence_column.clone(),
        ]
    }

    fn apply(&self, table: &mut PriceTable) -> Result<()> {
        let macd = table.require_column(&self.config.source)?;
        let signal = self.stats.mean(macd);
        let divergence: Vec<f64> = macd
            .iter()
            .zip(signal.iter())
            .map(|(m, s)| m - s)
            .collect();

        table.insert_column(self.config.signal_column.clone(), signal)?;
        table.insert_column(self.config.divergence_column.clone(), divergence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasig_spi::Bar;

    #[test]
    fn constant_close_converges_to_zero() {
        let macd = Macd::new(MacdConfig::default()).unwrap();
        let out = macd.calculate(&[250.0; 100]);
        // Identical EWMAs from the start: the line is exactly zero.
        for v in out {
            assert!(v.abs() < 1e-12);
        }
    }

    #[test]
    fn sign_is_slow_minus_fast() {
        // Rising prices: the fast EWMA leads, so slow - fast is negative.
        let macd = Macd::new(MacdConfig::new(3, 9)).unwrap();
        let close: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let out = macd.calculate(&close);
        assert!(out[59] < 0.0);
    }

    #[test]
    fn signal_stage_requires_macd_column() {
        let bars: Vec<Bar> = (0..10)
            .map(|i| Bar::new(i, 10.0, 11.0, 9.0, 10.0, 1.0))
            .collect();
        let mut table = PriceTable::from_bars(&bars).unwrap();

        let stage = MacdSignal::new(MacdSignalConfig::default()).unwrap();
        assert!(stage.apply(&mut table).is_err());
    }

    #[test]
    fn divergence_is_macd_minus_signal() {
        let bars: Vec<Bar> = (0..40)
            .map(|i| {
                let c = 100.0 + (i as f64 * 0.5).sin() * 3.0;
                Bar::new(i, c, c + 1.0, c - 1.0, c, 1.0)
            })
            .collect();
        let mut table = PriceTable::from_bars(&bars).unwrap();

        Macd::new(MacdConfig::default())
            .unwrap()
            .apply(&mut table)
            .unwrap();
        MacdSignal::new(MacdSignalConfig::new(5))
            .unwrap()
            .apply(&mut table)
            .unwrap();

        let macd = table.column("macd").unwrap().to_vec();
        let signal = table.column("macd_signal").unwrap().to_vec();
        let div = table.column("macd_divergence").unwrap();

        for i in 0..40 {
            if signal[i].is_nan() {
                assert!(div[i].is_nan());
            } else {
                assert!((div[i] - (macd[i] - signal[i])).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn constant_close_divergence_converges_to_zero() {
        let bars: Vec<Bar> = (0..80)
            .map(|i| Bar::new(i, 42.0, 42.0, 42.0, 42.0, 1.0))
            .collect();
        let mut table = PriceTable::from_bars(&bars).unwrap();

        Macd::new(MacdConfig::default())
            .unwrap()
            .apply(&mut table)
            .unwrap();
        MacdSignal::new(MacdSignalConfig::default())
            .unwrap()
            .apply(&mut table)
            .unwrap();

        let div = table.column("macd_divergence").unwrap();
        assert!(div[79].abs() < 1e-12);
    }
}
