//! Session → snapshot transformation
//!
//! The only non-trivial step between the provider and the HTTP layer:
//! project the lap table into [`LapRecord`]s and pull each driver's fastest-lap
//! channels into a [`TelemetrySeries`].

use std::collections::HashSet;
use tracing::{debug, info};

use crate::export::LapExportRecord;
use crate::session::{Lap, LoadedSession};
use crate::snapshot::{LapRecord, SessionSnapshot, TelemetrySeries};
use crate::types::format_timedelta;

/// Build the snapshot served by `GET /telemetry`.
pub fn build_snapshot(session: &LoadedSession) -> SessionSnapshot {
    let laps = session.laps().iter().map(lap_record).collect::<Vec<_>>();
    let telemetry = fastest_lap_telemetry(session);

    info!(
        session = %session.id(),
        laps = laps.len(),
        drivers = telemetry.len(),
        "Built session snapshot"
    );

    SessionSnapshot { laps, telemetry }
}

/// Project the lap table into the narrower batch export shape.
pub fn export_laps(session: &LoadedSession) -> Vec<LapExportRecord> {
    session
        .laps()
        .iter()
        .map(|lap| LapExportRecord {
            driver: lap.driver.clone(),
            lap: lap.lap_number,
            position: lap.position,
            time: lap.lap_time.map(format_timedelta),
        })
        .collect()
}

fn lap_record(lap: &Lap) -> LapRecord {
    LapRecord {
        driver: lap.driver.clone(),
        lap_number: lap.lap_number,
        position: lap.position,
        lap_time: lap.lap_time.map(format_timedelta),
        sector1_time: lap.sector1_time.map(format_timedelta),
        sector2_time: lap.sector2_time.map(format_timedelta),
        sector3_time: lap.sector3_time.map(format_timedelta),
    }
}

/// One series per driver, in driver enumeration order.
fn fastest_lap_telemetry(session: &LoadedSession) -> Vec<TelemetrySeries> {
    let mut seen = HashSet::new();
    let mut telemetry = Vec::with_capacity(session.drivers().len());

    for entry in session.drivers() {
        let code = entry.abbreviation.as_str();

        if !seen.insert(code) {
            debug!(driver = code, "Duplicate driver entry, skipping");
            continue;
        }

        let Some(fastest) = session.pick_fastest(code) else {
            debug!(driver = code, "No timed lap, skipping telemetry");
            continue;
        };

        let series = session.lap_telemetry(fastest);
        debug!(
            driver = code,
            name = entry.full_name.as_deref(),
            team = entry.team_name.as_deref(),
            lap = fastest.lap_number,
            samples = series.len(),
            "Extracted fastest lap telemetry"
        );
        telemetry.push(series);
    }

    telemetry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{CarSample, DriverInfo};
    use crate::test_utils::{self, FIXTURE_SAMPLES};
    use crate::types::SessionId;
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;
    use std::collections::{HashMap, HashSet};
    use std::time::Duration;

    #[test]
    fn fixture_session_end_to_end() {
        let session = test_utils::fixture_session();
        let snapshot = build_snapshot(&session);

        assert_eq!(snapshot.laps.len(), 6);
        assert_eq!(snapshot.telemetry.len(), 1);

        let ver = &snapshot.telemetry[0];
        assert_eq!(ver.driver(), "VER");
        assert_eq!(ver.speed().len(), FIXTURE_SAMPLES);
        assert_eq!(ver.throttle().len(), FIXTURE_SAMPLES);
        assert_eq!(ver.brake().len(), FIXTURE_SAMPLES);
        assert_eq!(ver.gear().len(), FIXTURE_SAMPLES);
        assert!(snapshot.telemetry_for("PER").is_none());
    }

    #[test]
    fn lap_records_preserve_row_order_and_optional_fields() {
        let session = test_utils::fixture_session();
        let snapshot = build_snapshot(&session);

        let order = snapshot
            .laps
            .iter()
            .map(|lap| (lap.driver.as_str(), lap.lap_number))
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![("VER", 1), ("PER", 1), ("VER", 2), ("PER", 2), ("VER", 3), ("PER", 3)]
        );

        let ver_lap2 = &snapshot.laps[2];
        assert_eq!(ver_lap2.position, Some(1));
        assert_eq!(ver_lap2.lap_time.as_deref(), Some("0 days 00:01:35.500000"));
        assert_eq!(ver_lap2.sector1_time.as_deref(), Some("0 days 00:00:31.200000"));

        let per_lap1 = &snapshot.laps[1];
        assert_eq!(per_lap1.position, None);
        assert_eq!(per_lap1.lap_time, None);
        assert_eq!(per_lap1.sector3_time, None);
    }

    #[test]
    fn export_keeps_lap_fields_only() {
        let session = test_utils::fixture_session();
        let export = export_laps(&session);

        assert_eq!(export.len(), 6);
        assert_eq!(export[2].driver, "VER");
        assert_eq!(export[2].lap, 2);
        assert_eq!(export[2].position, Some(1));
        assert_eq!(export[2].time.as_deref(), Some("0 days 00:01:35.500000"));
        assert_eq!(export[1].time, None);
    }

    #[test]
    fn duplicate_driver_entries_yield_one_series() {
        let session = test_utils::fixture_session();
        let mut drivers = session.drivers().to_vec();
        drivers.push(drivers[0].clone());
        let car_data = HashMap::from([("1".to_string(), session.car_data("1").to_vec())]);
        let session = LoadedSession::new(session.id(), drivers, session.laps().to_vec(), car_data);

        let snapshot = build_snapshot(&session);
        assert_eq!(snapshot.telemetry.len(), 1);
    }

    #[test]
    fn timed_laps_of_unlisted_drivers_get_telemetry() {
        let start = base_time();
        let laps = vec![Lap {
            driver: "99".to_string(),
            driver_number: "99".to_string(),
            lap_number: 1,
            position: Some(20),
            lap_time: Some(Duration::from_secs(100)),
            sector1_time: None,
            sector2_time: None,
            sector3_time: None,
            start: Some(start),
        }];
        let samples = (0..5)
            .map(|s| CarSample {
                date: start + chrono::Duration::seconds(s),
                speed: 300.0,
                throttle: 100.0,
                brake: false,
                gear: 8,
            })
            .collect();
        let session = LoadedSession::new(
            SessionId::BAHRAIN_2024,
            test_utils::fixture_session().drivers()[..1].to_vec(),
            laps,
            HashMap::from([("99".to_string(), samples)]),
        );

        let snapshot = build_snapshot(&session);
        assert_eq!(snapshot.telemetry.len(), 1);
        assert_eq!(snapshot.telemetry_for("99").map(|s| s.gear().to_vec()), Some(vec![8; 5]));
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 2, 15, 0, 0).unwrap()
    }

    /// Random sessions: each driver gets a list of optional lap times (ms).
    /// Unlisted drivers appear in the lap table but not in the driver list.
    fn arb_session() -> impl Strategy<Value = LoadedSession> {
        prop::collection::vec(
            (
                prop::collection::vec(prop::option::of(80_000u64..120_000), 0..6),
                0u32..21,
                prop::bool::weighted(0.8),
            ),
            1..8,
        )
        .prop_map(|per_driver| {
            let mut drivers = Vec::new();
            let mut laps = Vec::new();
            let mut car_data = HashMap::new();

            for (idx, (times, position, listed)) in per_driver.into_iter().enumerate() {
                let number = (idx + 1).to_string();
                let code = if listed { format!("D{idx:02}") } else { number.clone() };
                if listed {
                    drivers.push(DriverInfo {
                        number: number.clone(),
                        abbreviation: code.clone(),
                        full_name: None,
                        team_name: None,
                    });
                }

                let mut clock = base_time();
                for (i, ms) in times.into_iter().enumerate() {
                    let lap_time = ms.map(Duration::from_millis);
                    laps.push(Lap {
                        driver: code.clone(),
                        driver_number: number.clone(),
                        lap_number: i as u32 + 1,
                        position: (position > 0).then_some(position),
                        lap_time,
                        sector1_time: None,
                        sector2_time: None,
                        sector3_time: None,
                        start: Some(clock),
                    });
                    clock += chrono::Duration::milliseconds(ms.unwrap_or(100_000) as i64);
                }

                let samples = (0..(clock - base_time()).num_seconds())
                    .map(|s| CarSample {
                        date: base_time() + chrono::Duration::seconds(s),
                        speed: 250.0,
                        throttle: 80.0,
                        brake: false,
                        gear: 6,
                    })
                    .collect();
                car_data.insert(number, samples);
            }

            LoadedSession::new(SessionId::BAHRAIN_2024, drivers, laps, car_data)
        })
    }

    proptest! {
        #[test]
        fn prop_snapshot_invariants_hold(session in arb_session()) {
            let snapshot = build_snapshot(&session);

            prop_assert_eq!(snapshot.laps.len(), session.laps().len());

            for lap in &snapshot.laps {
                prop_assert!(lap.lap_number >= 1);
                if let Some(pos) = lap.position {
                    prop_assert!(pos >= 1);
                }
            }

            let mut seen = HashSet::new();
            for series in &snapshot.telemetry {
                prop_assert!(seen.insert(series.driver().to_string()), "duplicate {}", series.driver());
                let n = series.len();
                prop_assert_eq!(series.throttle().len(), n);
                prop_assert_eq!(series.brake().len(), n);
                prop_assert_eq!(series.gear().len(), n);
            }

            let codes = session
                .drivers()
                .iter()
                .map(|d| d.abbreviation.as_str())
                .chain(snapshot.laps.iter().map(|lap| lap.driver.as_str()))
                .collect::<HashSet<_>>();
            for code in codes {
                let has_timed_lap =
                    snapshot.laps.iter().any(|lap| lap.driver == code && lap.lap_time.is_some());
                prop_assert_eq!(snapshot.telemetry_for(code).is_some(), has_timed_lap, "{}", code);
            }
        }
    }
}
