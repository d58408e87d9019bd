//! Snapshot data model served to the frontend
//!
//! A [`SessionSnapshot`] is built once from a loaded session and never mutated.
//! Field names are the JSON keys the frontend reads.

use serde::{Deserialize, Serialize};

/// One lap by one driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapRecord {
    /// Three-letter driver code
    pub driver: String,
    /// 1-based lap number
    pub lap_number: u32,
    /// Running position at the end of the lap
    pub position: Option<u32>,
    pub lap_time: Option<String>,
    pub sector1_time: Option<String>,
    pub sector2_time: Option<String>,
    pub sector3_time: Option<String>,
}

/// A single telemetry tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    /// km/h
    pub speed: f64,
    /// Pedal travel, 0-100
    pub throttle: f64,
    pub brake: bool,
    pub gear: u8,
}

/// Channel arrays for one driver's fastest lap.
///
/// All four channels always have the same length: samples can only be added
/// whole, and deserialization rejects mismatched arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(try_from = "RawSeries")]
pub struct TelemetrySeries {
    driver: String,
    speed: Vec<f64>,
    throttle: Vec<f64>,
    brake: Vec<bool>,
    gear: Vec<u8>,
}

impl TelemetrySeries {
    /// Create an empty series for a driver.
    pub fn new(driver: impl Into<String>) -> Self {
        Self {
            driver: driver.into(),
            speed: Vec::new(),
            throttle: Vec::new(),
            brake: Vec::new(),
            gear: Vec::new(),
        }
    }

    /// Create an empty series with room for `capacity` samples.
    pub fn with_capacity(driver: impl Into<String>, capacity: usize) -> Self {
        Self {
            driver: driver.into(),
            speed: Vec::with_capacity(capacity),
            throttle: Vec::with_capacity(capacity),
            brake: Vec::with_capacity(capacity),
            gear: Vec::with_capacity(capacity),
        }
    }

    /// Append one sample to every channel.
    pub fn push(&mut self, sample: TelemetrySample) {
        self.speed.push(sample.speed);
        self.throttle.push(sample.throttle);
        self.brake.push(sample.brake);
        self.gear.push(sample.gear);
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    pub fn speed(&self) -> &[f64] {
        &self.speed
    }

    pub fn throttle(&self) -> &[f64] {
        &self.throttle
    }

    pub fn brake(&self) -> &[bool] {
        &self.brake
    }

    pub fn gear(&self) -> &[u8] {
        &self.gear
    }

    /// Number of samples (shared by all channels).
    pub fn len(&self) -> usize {
        self.speed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speed.is_empty()
    }
}

impl Extend<TelemetrySample> for TelemetrySeries {
    fn extend<I: IntoIterator<Item = TelemetrySample>>(&mut self, iter: I) {
        for sample in iter {
            self.push(sample);
        }
    }
}

#[derive(Deserialize)]
struct RawSeries {
    driver: String,
    speed: Vec<f64>,
    throttle: Vec<f64>,
    brake: Vec<bool>,
    gear: Vec<u8>,
}

impl TryFrom<RawSeries> for TelemetrySeries {
    type Error = String;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        let len = raw.speed.len();
        if raw.throttle.len() != len || raw.brake.len() != len || raw.gear.len() != len {
            return Err(format!(
                "channel lengths differ for {}: speed={}, throttle={}, brake={}, gear={}",
                raw.driver,
                len,
                raw.throttle.len(),
                raw.brake.len(),
                raw.gear.len()
            ));
        }
        Ok(Self {
            driver: raw.driver,
            speed: raw.speed,
            throttle: raw.throttle,
            brake: raw.brake,
            gear: raw.gear,
        })
    }
}

/// Everything served from `GET /telemetry`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct SessionSnapshot {
    /// Lap summaries in source row order
    pub laps: Vec<LapRecord>,
    /// Fastest-lap telemetry in driver enumeration order
    pub telemetry: Vec<TelemetrySeries>,
}

impl SessionSnapshot {
    /// Telemetry for a driver code, if the driver set a timed lap.
    pub fn telemetry_for(&self, driver: &str) -> Option<&TelemetrySeries> {
        self.telemetry.iter().find(|series| series.driver == driver)
    }
}
