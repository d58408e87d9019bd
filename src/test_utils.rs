//! Test utilities: fixed fixture sessions for transformer, server and bench tests
//!
//! The fixture models a two-driver, three-lap race:
//! - VER completes every lap and is fastest on lap 2, which carries exactly
//!   [`FIXTURE_SAMPLES`] telemetry samples
//! - PER is on track for three laps but never records a lap time

#![cfg(any(test, feature = "benchmark"))]

use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::time::Duration;

use crate::session::{CarSample, DriverInfo, Lap, LoadedSession};
use crate::types::SessionId;

/// Samples inside VER's fastest lap.
pub const FIXTURE_SAMPLES: usize = 50;

/// Race start used by the fixture.
pub fn fixture_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 2, 15, 3, 0).single().unwrap_or(DateTime::UNIX_EPOCH)
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn at(offset_ms: i64) -> DateTime<Utc> {
    fixture_start() + chrono::Duration::milliseconds(offset_ms)
}

fn driver(number: &str, code: &str, full_name: &str) -> DriverInfo {
    DriverInfo {
        number: number.to_string(),
        abbreviation: code.to_string(),
        full_name: Some(full_name.to_string()),
        team_name: Some("Red Bull Racing".to_string()),
    }
}

fn ver_lap(lap_number: u32, position: u32, sectors: [u64; 3], start_ms: i64) -> Lap {
    Lap {
        driver: "VER".to_string(),
        driver_number: "1".to_string(),
        lap_number,
        position: Some(position),
        lap_time: Some(ms(sectors.iter().sum())),
        sector1_time: Some(ms(sectors[0])),
        sector2_time: Some(ms(sectors[1])),
        sector3_time: Some(ms(sectors[2])),
        start: Some(at(start_ms)),
    }
}

fn per_lap(lap_number: u32, start: Option<DateTime<Utc>>) -> Lap {
    Lap {
        driver: "PER".to_string(),
        driver_number: "11".to_string(),
        lap_number,
        position: None,
        lap_time: None,
        sector1_time: None,
        sector2_time: None,
        sector3_time: None,
        start,
    }
}

fn samples(start_ms: i64, period_ms: i64, count: i64, speed_base: f64) -> Vec<CarSample> {
    (0..count)
        .map(|k| CarSample {
            date: at(start_ms + k * period_ms),
            speed: speed_base + k as f64 * 0.75,
            throttle: if k % 10 < 7 { 100.0 } else { 0.0 },
            brake: k % 10 >= 7,
            gear: (3 + k % 6) as u8,
        })
        .collect()
}

/// The two-driver fixture session described in the module docs.
pub fn fixture_session() -> LoadedSession {
    // VER: 98.0s, 95.5s (fastest), 96.8s
    let laps = vec![
        ver_lap(1, 1, [32_400, 32_900, 32_700], 0),
        per_lap(1, Some(at(0))),
        ver_lap(2, 1, [31_200, 32_100, 32_200], 98_000),
        per_lap(2, None),
        ver_lap(3, 1, [31_900, 32_400, 32_500], 193_500),
        per_lap(3, None),
    ];

    let mut ver = samples(0, 2_000, 49, 180.0);
    // 50 * 1.91s == 95.5s, so the last tick lands exactly on the lap end (exclusive)
    ver.extend(samples(98_000, 1_910, FIXTURE_SAMPLES as i64, 200.0));
    ver.extend(samples(193_500, 2_000, 48, 190.0));

    let per = samples(0, 2_000, 140, 170.0);

    LoadedSession::new(
        SessionId::BAHRAIN_2024,
        vec![driver("1", "VER", "Max Verstappen"), driver("11", "PER", "Sergio Perez")],
        laps,
        HashMap::from([("1".to_string(), ver), ("11".to_string(), per)]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_shape() {
        let session = fixture_session();
        assert_eq!(session.laps().len(), 6);
        assert_eq!(session.drivers().len(), 2);

        let fastest = session.pick_fastest("VER").expect("VER has a fastest lap");
        assert_eq!(fastest.lap_number, 2);
        assert_eq!(fastest.lap_time, Some(ms(95_500)));
        assert_eq!(session.lap_telemetry(fastest).len(), FIXTURE_SAMPLES);

        assert!(session.pick_fastest("PER").is_none());
    }
}
