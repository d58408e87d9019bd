//! # Loaded Session
//!
//! A [`LoadedSession`] is everything a provider fetched for one session, already
//! parsed into Rust types: the driver enumeration, the lap table in source row
//! order, and each driver's raw car data.
//!
//! The accessors here mirror how the snapshot is built:
//!
//! ```text
//! drivers() ──► get_driver(number) ──► abbreviation
//!                                          │
//!                                          ▼
//! laps() ──► pick_driver(code) ──► pick_fastest(code) ──► lap_telemetry(lap)
//! ```
//!
//! Nothing in this module performs I/O.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

use crate::snapshot::{TelemetrySample, TelemetrySeries};
use crate::types::SessionId;

/// Driver entry from the session's driver list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverInfo {
    /// Racing number as a string ("1", "11", ...)
    pub number: String,
    /// Three-letter display code ("VER")
    pub abbreviation: String,
    pub full_name: Option<String>,
    pub team_name: Option<String>,
}

/// One row of the lap table.
#[derive(Debug, Clone, PartialEq)]
pub struct Lap {
    /// Display code of the driver who set the lap
    pub driver: String,
    pub driver_number: String,
    pub lap_number: u32,
    pub position: Option<u32>,
    pub lap_time: Option<Duration>,
    pub sector1_time: Option<Duration>,
    pub sector2_time: Option<Duration>,
    pub sector3_time: Option<Duration>,
    /// Wall-clock time the lap started
    pub start: Option<DateTime<Utc>>,
}

impl Lap {
    /// Wall-clock time the lap ended, when both start and lap time are known.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        let start = self.start?;
        let lap_time = chrono::Duration::from_std(self.lap_time?).ok()?;
        Some(start + lap_time)
    }
}

/// Raw car telemetry sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarSample {
    pub date: DateTime<Utc>,
    pub speed: f64,
    pub throttle: f64,
    pub brake: bool,
    pub gear: u8,
}

impl From<&CarSample> for TelemetrySample {
    fn from(sample: &CarSample) -> Self {
        TelemetrySample {
            speed: sample.speed,
            throttle: sample.throttle,
            brake: sample.brake,
            gear: sample.gear,
        }
    }
}

/// A fully loaded session.
#[derive(Debug, Clone)]
pub struct LoadedSession {
    id: SessionId,
    drivers: Vec<DriverInfo>,
    laps: Vec<Lap>,
    /// Car data keyed by driver number, each ordered by time
    car_data: HashMap<String, Vec<CarSample>>,
}

impl LoadedSession {
    /// Assemble a session from provider data.
    ///
    /// Car samples are sorted by timestamp per driver. A lap driver missing from
    /// `drivers` is appended to the enumeration in first-seen order, so every
    /// driver in the lap table is considered for telemetry.
    pub fn new(
        id: SessionId,
        mut drivers: Vec<DriverInfo>,
        laps: Vec<Lap>,
        mut car_data: HashMap<String, Vec<CarSample>>,
    ) -> Self {
        for lap in &laps {
            if !drivers.iter().any(|d| d.abbreviation == lap.driver) {
                drivers.push(DriverInfo {
                    number: lap.driver_number.clone(),
                    abbreviation: lap.driver.clone(),
                    full_name: None,
                    team_name: None,
                });
            }
        }
        for samples in car_data.values_mut() {
            samples.sort_by_key(|s| s.date);
        }
        Self { id, drivers, laps, car_data }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Drivers in the provider's enumeration order.
    pub fn drivers(&self) -> &[DriverInfo] {
        &self.drivers
    }

    /// Lap table in source row order.
    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    /// Look up a driver by racing number.
    pub fn get_driver(&self, number: &str) -> Option<&DriverInfo> {
        self.drivers.iter().find(|d| d.number == number)
    }

    /// All laps attributed to a driver code, in row order.
    pub fn pick_driver<'s>(&'s self, code: &str) -> impl Iterator<Item = &'s Lap> {
        self.laps.iter().filter(move |lap| lap.driver == code)
    }

    /// The driver's lap with the smallest recorded lap time.
    ///
    /// Laps without a time are ignored; ties go to the earlier row.
    pub fn pick_fastest(&self, code: &str) -> Option<&Lap> {
        self.pick_driver(code)
            .filter_map(|lap| lap.lap_time.map(|t| (t, lap)))
            .fold(None, |best: Option<(Duration, &Lap)>, (t, lap)| match best {
                Some((best_t, _)) if best_t <= t => best,
                _ => Some((t, lap)),
            })
            .map(|(_, lap)| lap)
    }

    /// Raw car data for a driver number.
    pub fn car_data(&self, driver_number: &str) -> &[CarSample] {
        self.car_data.get(driver_number).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Channel arrays for a single lap, sampled at the source tick rate.
    ///
    /// Covers samples in `[start, start + lap_time)`. A lap with no start or no
    /// lap time yields an empty series.
    pub fn lap_telemetry(&self, lap: &Lap) -> TelemetrySeries {
        let (Some(start), Some(end)) = (lap.start, lap.end()) else {
            return TelemetrySeries::new(lap.driver.clone());
        };

        let samples = self.car_data(&lap.driver_number);
        let from = samples.partition_point(|s| s.date < start);
        let to = samples.partition_point(|s| s.date < end);
        let window = &samples[from..to.max(from)];

        let mut series = TelemetrySeries::with_capacity(lap.driver.clone(), window.len());
        series.extend(window.iter().map(TelemetrySample::from));
        series
    }
}
