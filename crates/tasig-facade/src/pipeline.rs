//! Standard enrichment pipeline.

use tasig_api::{
    BollingerConfig, EwmaColumnConfig, KeltnerConfig, MacdConfig, MacdSignalConfig,
};
use tasig_core::{BollingerBands, EwmaColumn, KeltnerChannels, Macd, MacdSignal};
use tasig_signal::{EwmaCrossoverSignal, SqueezeSignal};
use tasig_spi::{PriceTable, Result, TableStage};

/// An ordered chain of table stages.
///
/// Stages run in the order they were added; dependency order is the
/// caller's responsibility when building a custom chain. Each stage is a
/// pure transform, so the pipeline holds no per-table state and one
/// instance can enrich any number of tables.
pub struct SignalPipeline {
    stages: Vec<Box<dyn TableStage>>,
}

impl SignalPipeline {
    /// Empty pipeline for custom chains.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage.
    pub fn with_stage(mut self, stage: impl TableStage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// The standard chain with documented defaults, in dependency order:
    /// Bollinger and Keltner envelopes, MACD line and signal, the fast/slow
    /// EWMA pair, then the squeeze and crossover detectors.
    pub fn standard() -> Result<Self> {
        Ok(Self::new()
            .with_stage(BollingerBands::new(BollingerConfig::default())?)
            .with_stage(KeltnerChannels::new(KeltnerConfig::default())?)
            .with_stage(Macd::new(MacdConfig::default())?)
            .with_stage(MacdSignal::new(MacdSignalConfig::default())?)
            .with_stage(EwmaColumn::new(EwmaColumnConfig::fast())?)
            .with_stage(EwmaColumn::new(EwmaColumnConfig::slow())?)
            .with_stage(SqueezeSignal::default())
            .with_stage(EwmaCrossoverSignal::default()))
    }

    /// Run every stage against the table, in order.
    pub fn apply(&self, table: &mut PriceTable) -> Result<()> {
        for stage in &self.stages {
            stage.apply(table)?;
        }
        Ok(())
    }

    /// Column names the chain appends, in output order.
    pub fn output_columns(&self) -> Vec<String> {
        self.stages
            .iter()
            .flat_map(|s| s.output_columns())
            .collect()
    }
}

impl Default for SignalPipeline {
    fn default() -> Self {
        Self::new()
    }
}
