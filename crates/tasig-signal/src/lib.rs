//! Signal Detectors
//!
//! Boolean/categorical event columns derived from already-computed
//! indicator columns. Detectors read indicator outputs by name and treat
//! undefined (NaN) inputs as a failed comparison, never as an event.

mod crossover;
mod squeeze;

pub use crossover::{EwmaCrossoverConfig, EwmaCrossoverSignal};
pub use squeeze::{SqueezeConfig, SqueezeSignal};
