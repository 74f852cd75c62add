//! Indicator Pipeline Facade
//!
//! Unified re-exports plus the standard stage chain.

mod pipeline;

// Re-export everything from SPI
pub use tasig_spi::*;

// Re-export everything from API
pub use tasig_api::*;

// Re-export everything from Core
pub use tasig_core::*;

// Re-export the signal detectors
pub use tasig_signal::*;

pub use pipeline::SignalPipeline;
