//! EWMA crossover detector.

use serde::{Deserialize, Serialize};
use tasig_spi::{columns, PriceTable, Result, TableStage};

/// Crossover detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EwmaCrossoverConfig {
    pub fast: String,
    pub slow: String,
    pub up_column: String,
    pub down_column: String,
}

impl Default for EwmaCrossoverConfig {
    fn default() -> Self {
        Self {
            fast: columns::EWMA_FAST.to_string(),
            slow: columns::EWMA_SLOW.to_string(),
            up_column: columns::CROSS_UP.to_string(),
            down_column: columns::CROSS_DOWN.to_string(),
        }
    }
}

/// Fast/slow EWMA crossover signal.
///
/// Two columns: the up column is 1.0 where the fast series crosses strictly
/// above the slow one relative to the immediately preceding row
/// (`fast[t] > slow[t] && fast[t-1] < slow[t-1]`), the down column is -1.0
/// under the mirrored condition; both are 0.0 otherwise. The first row can
/// never be a crossover, and NaN rows compare false.
#[derive(Debug, Clone)]
pub struct EwmaCrossoverSignal {
    config: EwmaCrossoverConfig,
}

impl EwmaCrossoverSignal {
    pub fn new(config: EwmaCrossoverConfig) -> Self {
        Self { config }
    }
}

impl Default for EwmaCrossoverSignal {
    fn default() -> Self {
        Self::new(EwmaCrossoverConfig::default())
    }
}

impl TableStage for EwmaCrossoverSignal {
    fn name(&self) -> &str {
        "EwmaCrossoverSignal"
    }

    fn output_columns(&self) -> Vec<String> {
        vec![
            self.config.up_column.clone(),
            self.config.down_column.clone(),
        ]
    }

    fn apply(&self, table: &mut PriceTable) -> Result<()> {
        let fast = table.require_column(&self.config.fast)?;
        let slow = table.require_column(&self.config.slow)?;

        let n = table.len();
        let mut up = Vec::with_capacity(n);
        let mut down = Vec::with_capacity(n);
        if n > 0 {
            up.push(0.0);
            down.push(0.0);
        }
        for t in 1..n {
            let crossed_up = fast[t] > slow[t] && fast[t - 1] < slow[t - 1];
            let crossed_down = fast[t] < slow[t] && fast[t - 1] > slow[t - 1];
            up.push(if crossed_up { 1.0 } else { 0.0 });
            down.push(if crossed_down { -1.0 } else { 0.0 });
        }

        table.insert_column(self.config.up_column.clone(), up)?;
        table.insert_column(self.config.down_column.clone(), down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasig_spi::Bar;

    fn table_with(fast: Vec<f64>, slow: Vec<f64>) -> PriceTable {
        let bars: Vec<Bar> = (0..fast.len())
            .map(|i| Bar::new(i as i64, 10.0, 11.0, 9.0, 10.0, 1.0))
            .collect();
        let mut table = PriceTable::from_bars(&bars).unwrap();
        table.insert_column("ewma_fast", fast).unwrap();
        table.insert_column("ewma_slow", slow).unwrap();
        table
    }

    #[test]
    fn detects_an_up_cross() {
        let mut table = table_with(vec![1.0, 3.0], vec![2.0, 2.0]);
        EwmaCrossoverSignal::default().apply(&mut table).unwrap();

        assert_eq!(table.column("ewma_cross_up").unwrap(), &[0.0, 1.0]);
        assert_eq!(table.column("ewma_cross_down").unwrap(), &[0.0, 0.0]);
    }

    #[test]
    fn detects_a_down_cross() {
        let mut table = table_with(vec![2.0, 1.0], vec![1.0, 2.0]);
        EwmaCrossoverSignal::default().apply(&mut table).unwrap();

        assert_eq!(table.column("ewma_cross_up").unwrap(), &[0.0, 0.0]);
        assert_eq!(table.column("ewma_cross_down").unwrap(), &[0.0, -1.0]);
    }

    #[test]
    fn touching_then_crossing_is_not_a_cross() {
        // fast equals slow at t-1: the strict prior-row condition fails.
        let mut table = table_with(vec![2.0, 3.0], vec![2.0, 2.0]);
        EwmaCrossoverSignal::default().apply(&mut table).unwrap();
        assert_eq!(table.column("ewma_cross_up").unwrap(), &[0.0, 0.0]);
    }

    #[test]
    fn first_row_is_never_a_crossover() {
        let mut table = table_with(vec![5.0], vec![1.0]);
        EwmaCrossoverSignal::default().apply(&mut table).unwrap();
        assert_eq!(table.column("ewma_cross_up").unwrap(), &[0.0]);
        assert_eq!(table.column("ewma_cross_down").unwrap(), &[0.0]);
    }

    #[test]
    fn nan_rows_never_fire() {
        let mut table = table_with(vec![f64::NAN, 3.0, 1.0], vec![2.0, 2.0, 2.0]);
        EwmaCrossoverSignal::default().apply(&mut table).unwrap();
        assert_eq!(table.column("ewma_cross_up").unwrap(), &[0.0, 0.0, 0.0]);
        // t=2 has a defined prior row (3.0 > 2.0) and fires the down leg.
        assert_eq!(table.column("ewma_cross_down").unwrap(), &[0.0, 0.0, -1.0]);
    }

    #[test]
    fn missing_inputs_fail_fast() {
        let bars: Vec<Bar> = (0..3)
            .map(|i| Bar::new(i, 10.0, 11.0, 9.0, 10.0, 1.0))
            .collect();
        let mut table = PriceTable::from_bars(&bars).unwrap();
        assert!(EwmaCrossoverSignal::default().apply(&mut table).is_err());
    }
}
