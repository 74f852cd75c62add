//! Rolling-window statistics.

use tasig_spi::{Result, StageError};

/// Rolling mean and sample standard deviation over a trailing window.
///
/// Both outputs are aligned 1:1 with the input: the value at row `t` covers
/// the `window` observations ending at `t` inclusive. The first `window - 1`
/// rows are NaN. A window longer than the series yields an all-NaN column,
/// not an error.
#[derive(Debug, Clone)]
pub struct RollingStats {
    window: usize,
}

impl RollingStats {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(StageError::InvalidParameter {
                name: "window".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Rolling arithmetic mean.
    pub fn mean(&self, data: &[f64]) -> Vec<f64> {
        self.map_windows(data, |window| {
            window.iter().sum::<f64>() / window.len() as f64
        })
    }

    /// Rolling sample standard deviation (ddof = 1).
    ///
    /// A window of 1 has no sample variance, so the output is all NaN.
    pub fn std(&self, data: &[f64]) -> Vec<f64> {
        if self.window < 2 {
            return vec![f64::NAN; data.len()];
        }
        self.map_windows(data, |window| {
            let mean = window.iter().sum::<f64>() / window.len() as f64;
            let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
                / (window.len() - 1) as f64;
            variance.sqrt()
        })
    }

    /// Apply `f` to each full trailing window; NaN elsewhere.
    ///
    /// A window containing any NaN input produces NaN, so warm-up gaps in a
    /// derived source column propagate instead of skewing the statistic.
    fn map_windows(&self, data: &[f64], f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
        let n = data.len();
        if n < self.window {
            return vec![f64::NAN; n];
        }

        let mut out = vec![f64::NAN; self.window - 1];
        for i in (self.window - 1)..n {
            let window = &data[i + 1 - self.window..=i];
            if window.iter().any(|x| x.is_nan()) {
                out.push(f64::NAN);
            } else {
                out.push(f(window));
            }
        }
        out
    }
}
