//! Indicator Pipeline Service Provider Interface
//!
//! Defines the error taxonomy, the timestamp-indexed price table, and the
//! stage trait every indicator and signal detector implements.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Pipeline stage errors.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Missing column: {name}")]
    MissingColumn { name: String },

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Column '{name}' has {got} rows, table has {expected}")]
    LengthMismatch {
        name: String,
        got: usize,
        expected: usize,
    },

    #[error("Timestamp index not strictly increasing at row {index}")]
    NonMonotonicIndex { index: usize },

    #[error("Invalid bar at row {index}: {reason}")]
    InvalidBar { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, StageError>;

// ============================================================================
// Column Names
// ============================================================================

/// Default derived-column names.
///
/// Stages accept overrides through their configs; these are the documented
/// defaults the standard pipeline produces.
pub mod columns {
    pub const BB_UPPER: &str = "bb_upper";
    pub const BB_MIDDLE: &str = "bb_middle";
    pub const BB_LOWER: &str = "bb_lower";

    pub const ATR: &str = "atr";
    pub const KC_UPPER: &str = "kc_upper";
    pub const KC_MIDDLE: &str = "kc_middle";
    pub const KC_LOWER: &str = "kc_lower";

    pub const MACD: &str = "macd";
    pub const MACD_SIGNAL: &str = "macd_signal";
    pub const MACD_DIVERGENCE: &str = "macd_divergence";

    pub const EWMA_FAST: &str = "ewma_fast";
    pub const EWMA_SLOW: &str = "ewma_slow";

    pub const SQUEEZE: &str = "bbkc_squeeze";
    pub const CROSS_UP: &str = "ewma_cross_up";
    pub const CROSS_DOWN: &str = "ewma_cross_down";
}

// ============================================================================
// Bar Data
// ============================================================================

/// One OHLCV observation for a fixed time interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bar {
    /// Epoch seconds. Must be unique and strictly increasing within a table.
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check the OHLC range relationships and non-negative volume.
    fn check(&self) -> std::result::Result<(), String> {
        if self.high < self.low {
            return Err(format!("high {} below low {}", self.high, self.low));
        }
        if self.high < self.open || self.high < self.close {
            return Err("high below open/close".to_string());
        }
        if self.low > self.open || self.low > self.close {
            return Err("low above open/close".to_string());
        }
        if self.volume < 0.0 {
            return Err(format!("negative volume {}", self.volume));
        }
        Ok(())
    }
}

// ============================================================================
// Price Table
// ============================================================================

/// Timestamp-indexed OHLCV table plus derived columns.
///
/// The base series are parallel vectors keyed by a strictly increasing epoch
/// index. Derived columns are appended by pipeline stages, keep insertion
/// order, and always span the full row count. Undefined cells (warm-up gaps)
/// are `f64::NAN`, never zero.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    timestamps: Vec<i64>,
    open: Vec<f64>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
    derived: Vec<(String, Vec<f64>)>,
}

impl PriceTable {
    /// Build a table from parallel base columns.
    ///
    /// Fails fast on length mismatches or a timestamp index that is not
    /// strictly increasing.
    pub fn new(
        timestamps: Vec<i64>,
        open: Vec<f64>,
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
        volume: Vec<f64>,
    ) -> Result<Self> {
        let n = timestamps.len();
        for (name, col) in [
            ("open", &open),
            ("high", &high),
            ("low", &low),
            ("close", &close),
            ("volume", &volume),
        ] {
            if col.len() != n {
                return Err(StageError::LengthMismatch {
                    name: name.to_string(),
                    got: col.len(),
                    expected: n,
                });
            }
        }
        for i in 1..n {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(StageError::NonMonotonicIndex { index: i });
            }
        }
        Ok(Self {
            timestamps,
            open,
            high,
            low,
            close,
            volume,
            derived: Vec::new(),
        })
    }

    /// Build a table from bars, validating each bar's OHLC relationships.
    pub fn from_bars(bars: &[Bar]) -> Result<Self> {
        for (i, bar) in bars.iter().enumerate() {
            bar.check().map_err(|reason| StageError::InvalidBar { index: i, reason })?;
        }
        Self::new(
            bars.iter().map(|b| b.timestamp).collect(),
            bars.iter().map(|b| b.open).collect(),
            bars.iter().map(|b| b.high).collect(),
            bars.iter().map(|b| b.low).collect(),
            bars.iter().map(|b| b.close).collect(),
            bars.iter().map(|b| b.volume).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn open(&self) -> &[f64] {
        &self.open
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    /// Look up a derived column by name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.derived
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Look up a derived column, failing with `MissingColumn` if absent.
    pub fn require_column(&self, name: &str) -> Result<&[f64]> {
        self.column(name).ok_or_else(|| StageError::MissingColumn {
            name: name.to_string(),
        })
    }

    /// Insert a derived column aligned to the timestamp index.
    ///
    /// Replaces in place when the name already exists, so re-running a stage
    /// is idempotent and leaves every other column untouched.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> Result<()> {
        let name = name.into();
        if values.len() != self.len() {
            return Err(StageError::LengthMismatch {
                name,
                got: values.len(),
                expected: self.len(),
            });
        }
        match self.derived.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = values,
            None => self.derived.push((name, values)),
        }
        Ok(())
    }

    /// Derived column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.derived.iter().map(|(n, _)| n.as_str())
    }
}

// ============================================================================
// Stage Trait
// ============================================================================

/// One pure transform over a price table.
///
/// A stage reads base or derived columns and appends the columns it owns;
/// it never mutates columns it did not write. Required inputs are checked
/// before any computation. Warm-up insufficiency is encoded as NaN output,
/// not an error.
pub trait TableStage: Send + Sync {
    /// Stage name for diagnostics.
    fn name(&self) -> &str;

    /// Names of the columns this stage appends, in the order they appear.
    fn output_columns(&self) -> Vec<String>;

    /// Compute and append this stage's columns.
    fn apply(&self, table: &mut PriceTable) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(n: usize) -> Vec<Bar> {
        (0..n)
            .map(|i| {
                let base = 100.0 + i as f64;
                Bar::new(86_400 * i as i64, base, base + 1.0, base - 1.0, base + 0.5, 1000.0)
            })
            .collect()
    }

    #[test]
    fn from_bars_builds_aligned_table() {
        let table = PriceTable::from_bars(&bars(5)).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.close()[0], 100.5);
        assert!(table.column("anything").is_none());
    }

    #[test]
    fn rejects_non_monotonic_index() {
        let mut b = bars(3);
        b[2].timestamp = b[1].timestamp;
        let err = PriceTable::from_bars(&b).unwrap_err();
        assert!(matches!(err, StageError::NonMonotonicIndex { index: 2 }));
    }

    #[test]
    fn rejects_bad_bar() {
        let mut b = bars(3);
        b[1].high = b[1].low - 1.0;
        assert!(matches!(
            PriceTable::from_bars(&b),
            Err(StageError::InvalidBar { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = PriceTable::new(vec![1, 2], vec![1.0], vec![1.0; 2], vec![1.0; 2], vec![1.0; 2], vec![0.0; 2])
            .unwrap_err();
        assert!(matches!(err, StageError::LengthMismatch { .. }));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut table = PriceTable::from_bars(&bars(3)).unwrap();
        table.insert_column("a", vec![1.0; 3]).unwrap();
        table.insert_column("b", vec![2.0; 3]).unwrap();
        table.insert_column("a", vec![9.0; 3]).unwrap();

        let names: Vec<_> = table.column_names().collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(table.column("a").unwrap(), &[9.0; 3]);
    }

    #[test]
    fn insert_checks_alignment() {
        let mut table = PriceTable::from_bars(&bars(3)).unwrap();
        assert!(table.insert_column("short", vec![1.0]).is_err());
    }

    #[test]
    fn require_column_fails_fast() {
        let table = PriceTable::from_bars(&bars(3)).unwrap();
        let err = table.require_column("macd").unwrap_err();
        assert!(matches!(err, StageError::MissingColumn { name } if name == "macd"));
    }
}
