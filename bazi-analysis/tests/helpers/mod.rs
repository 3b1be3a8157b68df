//! Test Helper Utilities
//!
//! Shared utilities for testing bazi-analysis

#![allow(dead_code)]

pub mod log_capture;

use bazi_common::{CalendarOracle, Chart};
use chrono::{NaiveDate, NaiveDateTime};

pub use log_capture::{capture_logs, LogCapture};

/// Parse a chart literal
pub fn chart(s: &str) -> Chart {
    s.parse().expect("test chart should parse")
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

pub fn moment(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid test moment")
}

/// Oracle returning a fixed chart
pub struct FixedOracle {
    pub chart: Chart,
    pub earth_dominant: bool,
}

impl CalendarOracle for FixedOracle {
    fn four_pillars(&self, _at: NaiveDateTime) -> anyhow::Result<Chart> {
        Ok(self.chart)
    }

    fn is_earth_dominant(&self, _at: NaiveDateTime) -> anyhow::Result<bool> {
        Ok(self.earth_dominant)
    }
}

/// Oracle whose date range ends before the requested moment
pub struct OutOfRangeOracle;

impl CalendarOracle for OutOfRangeOracle {
    fn four_pillars(&self, at: NaiveDateTime) -> anyhow::Result<Chart> {
        anyhow::bail!("no solar-term data for {}", at)
    }

    fn is_earth_dominant(&self, _at: NaiveDateTime) -> anyhow::Result<bool> {
        Ok(false)
    }
}
