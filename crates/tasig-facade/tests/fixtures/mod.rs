//! Test fixtures - synthetic daily bar data.
//!
//! `daily_bars.json` holds 120 seeded random-walk OHLCV bars with a strictly
//! increasing daily timestamp index.

use std::fs;
use std::path::PathBuf;

use tasig_facade::{Bar, PriceTable};

fn fixtures_dir() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path
}

/// Load the daily bar fixture.
pub fn daily_bars() -> Vec<Bar> {
    let path = fixtures_dir().join("daily_bars.json");
    let content = fs::read_to_string(&path).expect("failed to read daily bar fixture");
    serde_json::from_str(&content).expect("failed to parse daily bar fixture")
}

/// Daily fixture as a validated price table.
pub fn daily_table() -> PriceTable {
    PriceTable::from_bars(&daily_bars()).expect("fixture bars should form a valid table")
}
