use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

/// Matches one benchstat result line of the filter suite, e.g.
/// `Filters/size=500/Lookup/BBloom-4   120.5ns ± 1%`.
///
/// `[A-z]` is the raw ASCII range `A..=z`, so it also admits `[\]^_` and backtick.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Filters/size=([0-9]+)/([A-z]+)/([A-z]+)-4\s+([0-9]+\.?[0-9]*)\s*(\p{L}s)")
        .expect("line pattern is valid")
});

/// A single benchmark measurement extracted from one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Measurement {
    /// Size category, e.g. "500"
    pub size: String,
    /// Operation being measured, e.g. "Lookup"
    pub method: String,
    /// Filter implementation, e.g. "BBloom"
    pub filter: String,
    /// Measured time as written in the file
    pub time: String,
    /// Unit suffix, e.g. "ns"
    pub unit: String,
}

impl Measurement {
    pub fn new(size: &str, method: &str, filter: &str, time: &str, unit: &str) -> Self {
        Self {
            size: size.to_string(),
            method: method.to_string(),
            filter: filter.to_string(),
            time: time.to_string(),
            unit: unit.to_string(),
        }
    }

    /// The measured time as a number in its own unit
    pub fn value(&self) -> Option<f64> {
        self.time.parse().ok()
    }

    /// The measured time converted to nanoseconds.
    /// `ns` and units without a known scale are left as-is.
    pub fn nanos(&self) -> Option<f64> {
        let scale = match self.unit.as_str() {
            "us" | "µs" | "μs" => 1_000.0,
            "ms" => 1_000_000.0,
            _ => 1.0,
        };
        self.value().map(|v| v * scale)
    }
}

/// Parse one line. Lines that don't look like a filter benchmark result yield `None`.
pub fn parse_line(line: &str) -> Option<Measurement> {
    let caps = LINE_PATTERN.captures(line)?;
    Some(Measurement::new(
        &caps[1], &caps[2], &caps[3], &caps[4], &caps[5],
    ))
}

/// Parse every matching line of `reader`, keeping input order
pub fn parse_measurements<R: BufRead>(reader: R) -> Result<Vec<Measurement>> {
    let mut measurements = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read benchmark line")?;
        if let Some(m) = parse_line(&line) {
            measurements.push(m);
        }
    }
    Ok(measurements)
}

/// Read and parse a benchstat results file
pub fn read_measurements(path: &Path) -> Result<Vec<Measurement>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open benchmark results {}", path.display()))?;
    parse_measurements(BufReader::new(file))
        .with_context(|| format!("Failed to read benchmark results {}", path.display()))
}
