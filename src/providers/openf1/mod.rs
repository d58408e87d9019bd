//! OpenF1 session provider
//!
//! Loads one session from the public OpenF1 REST API:
//!
//! ```text
//! /meetings?year ──► round n ──► /sessions?meeting_key ──► session_key
//!                                                              │
//!          ┌───────────────┬──────────────┬────────────────────┤
//!          ▼               ▼              ▼                    ▼
//!      /drivers          /laps        /position     /car_data (one per driver)
//! ```
//!
//! Every request is served from the [`ResponseCache`] when possible. A response
//! is written to the cache only after it parsed successfully.

pub mod wire;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::cache::ResponseCache;
use crate::config::ProviderConfig;
use crate::provider::SessionProvider;
use crate::session::{CarSample, DriverInfo, Lap, LoadedSession};
use crate::types::{SessionId, duration_from_secs};
use crate::{PaddockError, Result};

/// `/car_data` requests in flight at once. The public API rate-limits bursts.
const CAR_DATA_CONCURRENCY: usize = 4;

/// Provider backed by the OpenF1 API and an on-disk response cache.
#[derive(Debug, Clone)]
pub struct OpenF1Provider {
    client: Client,
    base_url: String,
    cache: ResponseCache,
}

impl OpenF1Provider {
    /// Build a provider from configuration, opening (and creating) the cache directory.
    pub async fn from_config(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("paddock/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PaddockError::http_error(config.base_url.clone(), e))?;
        let cache = ResponseCache::open(&config.cache_dir).await?;

        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string(), cache })
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Full request URL for an endpoint and query. Also the cache key.
    pub fn endpoint_url(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Url> {
        let base = format!("{}/{}", self.base_url, endpoint);
        Url::parse_with_params(&base, query)
            .map_err(|e| PaddockError::parse_error(format!("URL for {endpoint}"), e.to_string()))
    }

    /// Fetch and parse an endpoint, going through the response cache.
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let url = self.endpoint_url(endpoint, query)?;

        if let Some(body) = self.cache.get(url.as_str()).await? {
            return parse_rows(endpoint, &body);
        }

        debug!(%url, "Fetching from OpenF1");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| PaddockError::http_error(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PaddockError::status_error(url.as_str(), status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| PaddockError::http_error(url.as_str(), e))?;
        let rows = parse_rows(endpoint, &body)?;
        self.cache.put(url.as_str(), &body).await?;
        Ok(rows)
    }

    /// Resolve a session id to an OpenF1 session key.
    async fn session_key(&self, id: &SessionId) -> Result<u32> {
        let mut meetings =
            self.fetch::<wire::Meeting>("meetings", &[("year", id.season.to_string())]).await?;
        meetings.retain(|m| !m.is_testing());
        meetings.sort_by_key(|m| m.date_start);

        let meeting = usize::from(id.round)
            .checked_sub(1)
            .and_then(|idx| meetings.get(idx))
            .ok_or_else(|| PaddockError::session_not_found(*id))?;
        debug!(meeting = %meeting.meeting_name, key = meeting.meeting_key, "Resolved meeting");

        let sessions = self
            .fetch::<wire::Session>("sessions", &[("meeting_key", meeting.meeting_key.to_string())])
            .await?;
        let names = id.kind.openf1_names();
        sessions
            .iter()
            .find(|s| names.contains(&s.session_name.as_str()))
            .map(|s| s.session_key)
            .ok_or_else(|| PaddockError::session_not_found(*id))
    }
}

#[async_trait::async_trait]
impl SessionProvider for OpenF1Provider {
    async fn load(&self, id: &SessionId) -> Result<LoadedSession> {
        info!(session = %id, "Loading session from OpenF1");

        let session_key = self.session_key(id).await?;
        let by_session = [("session_key", session_key.to_string())];

        let drivers = self.fetch::<wire::Driver>("drivers", &by_session).await?;
        let laps = self.fetch::<wire::Lap>("laps", &by_session).await?;
        let positions = self.fetch::<wire::Position>("position", &by_session).await?;

        let car_data = stream::iter(telemetry_driver_numbers(&drivers, &laps))
            .map(|number| async move {
                let query = [
                    ("session_key", session_key.to_string()),
                    ("driver_number", number.to_string()),
                ];
                let rows = self.fetch::<wire::CarData>("car_data", &query).await?;
                Ok::<_, PaddockError>((number.to_string(), rows))
            })
            .buffered(CAR_DATA_CONCURRENCY)
            .try_collect::<Vec<_>>()
            .await?;

        let session = assemble(*id, drivers, laps, positions, car_data);
        info!(
            session = %id,
            session_key,
            drivers = session.drivers().len(),
            laps = session.laps().len(),
            "Session loaded"
        );
        Ok(session)
    }
}

fn parse_rows<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> Result<Vec<T>> {
    serde_json::from_slice(body)
        .map_err(|e| PaddockError::parse_error(format!("{endpoint} response"), e.to_string()))
}

/// Listed drivers first, then numbers that only appear in the lap table.
fn telemetry_driver_numbers(drivers: &[wire::Driver], laps: &[wire::Lap]) -> Vec<u32> {
    let mut numbers = drivers.iter().map(|d| d.driver_number).collect::<Vec<_>>();
    for row in laps.iter().filter(|row| row.lap_number >= 1) {
        if !numbers.contains(&row.driver_number) {
            warn!(
                driver_number = row.driver_number,
                "Lap rows for a driver missing from the driver list"
            );
            numbers.push(row.driver_number);
        }
    }
    numbers
}

/// Position timeline per driver number, ordered by time.
type Timelines = HashMap<u32, Vec<(DateTime<Utc>, u32)>>;

fn position_timelines(positions: Vec<wire::Position>) -> Timelines {
    let mut timelines: Timelines = HashMap::new();
    for p in positions {
        timelines.entry(p.driver_number).or_default().push((p.date, p.position));
    }
    for timeline in timelines.values_mut() {
        timeline.sort_by_key(|(date, _)| *date);
    }
    timelines
}

/// Most recent position at or before `at`.
fn position_at(timeline: &[(DateTime<Utc>, u32)], at: DateTime<Utc>) -> Option<u32> {
    let idx = timeline.partition_point(|(date, _)| *date <= at);
    idx.checked_sub(1).map(|i| timeline[i].1).filter(|&pos| pos >= 1)
}

fn assemble(
    id: SessionId,
    drivers: Vec<wire::Driver>,
    laps: Vec<wire::Lap>,
    positions: Vec<wire::Position>,
    car_data: Vec<(String, Vec<wire::CarData>)>,
) -> LoadedSession {
    let drivers = drivers
        .into_iter()
        .map(|d| DriverInfo {
            number: d.driver_number.to_string(),
            abbreviation: d.name_acronym.unwrap_or_else(|| d.driver_number.to_string()),
            full_name: d.full_name,
            team_name: d.team_name,
        })
        .collect::<Vec<_>>();

    let codes = drivers
        .iter()
        .map(|d| (d.number.clone(), d.abbreviation.clone()))
        .collect::<HashMap<_, _>>();
    let timelines = position_timelines(positions);

    let laps = laps
        .into_iter()
        .filter(|row| {
            if row.lap_number == 0 {
                warn!(driver_number = row.driver_number, "Dropping lap row with lap number 0");
            }
            row.lap_number >= 1
        })
        .map(|row| {
            let driver_number = row.driver_number.to_string();
            let driver = codes.get(&driver_number).cloned().unwrap_or_else(|| driver_number.clone());
            let mut lap = Lap {
                driver,
                driver_number,
                lap_number: row.lap_number,
                position: None,
                lap_time: row.lap_duration.and_then(duration_from_secs),
                sector1_time: row.duration_sector_1.and_then(duration_from_secs),
                sector2_time: row.duration_sector_2.and_then(duration_from_secs),
                sector3_time: row.duration_sector_3.and_then(duration_from_secs),
                start: row.date_start,
            };
            lap.position = lap
                .end()
                .zip(timelines.get(&row.driver_number))
                .and_then(|(end, timeline)| position_at(timeline, end));
            lap
        })
        .collect();

    let car_data = car_data
        .into_iter()
        .map(|(number, rows)| {
            let samples = rows
                .into_iter()
                .map(|r| CarSample {
                    date: r.date,
                    speed: r.speed,
                    throttle: r.throttle,
                    brake: r.brake > 0.0,
                    gear: r.n_gear,
                })
                .collect();
            (number, samples)
        })
        .collect();

    LoadedSession::new(id, drivers, laps, car_data)
}
