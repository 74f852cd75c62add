//! Bollinger-inside-Keltner squeeze detector.

use serde::{Deserialize, Serialize};
use tasig_spi::{columns, PriceTable, Result, TableStage};

/// Squeeze detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqueezeConfig {
    pub bb_upper: String,
    pub bb_lower: String,
    pub kc_upper: String,
    pub kc_lower: String,
    pub output: String,
}

impl Default for SqueezeConfig {
    fn default() -> Self {
        Self {
            bb_upper: columns::BB_UPPER.to_string(),
            bb_lower: columns::BB_LOWER.to_string(),
            kc_upper: columns::KC_UPPER.to_string(),
            kc_lower: columns::KC_LOWER.to_string(),
            output: columns::SQUEEZE.to_string(),
        }
    }
}

/// Squeeze signal: Bollinger Bands contained within Keltner Channels.
///
/// Emits 1.0 where `bb_upper < kc_upper && bb_lower >= kc_lower` (low
/// volatility), else 0.0. There is no undefined state: a NaN on either side
/// of a comparison makes it false, so warm-up rows read 0.0.
#[derive(Debug, Clone)]
pub struct SqueezeSignal {
    config: SqueezeConfig,
}

impl SqueezeSignal {
    pub fn new(config: SqueezeConfig) -> Self {
        Self { config }
    }
}

impl Default for SqueezeSignal {
    fn default() -> Self {
        Self::new(SqueezeConfig::default())
    }
}

impl TableStage for SqueezeSignal {
    fn name(&self) -> &str {
        "SqueezeSignal"
    }

    fn output_columns(&self) -> Vec<String> {
        vec![self.config.output.clone()]
    }

    fn apply(&self, table: &mut PriceTable) -> Result<()> {
        let bb_upper = table.require_column(&self.config.bb_upper)?;
        let bb_lower = table.require_column(&self.config.bb_lower)?;
        let kc_upper = table.require_column(&self.config.kc_upper)?;
        let kc_lower = table.require_column(&self.config.kc_lower)?;

        let mut out = Vec::with_capacity(table.len());
        for i in 0..table.len() {
            // NaN comparisons are false, which is exactly the contract.
            let on = bb_upper[i] < kc_upper[i] && bb_lower[i] >= kc_lower[i];
            out.push(if on { 1.0 } else { 0.0 });
        }

        table.insert_column(self.config.output.clone(), out)
    }
}
