//! OpenF1 response rows
//!
//! Only the fields the provider reads are declared; everything else in the
//! response is ignored. Times are float seconds, dates are ISO 8601 with offset.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// `GET /meetings`
#[derive(Debug, Clone, Deserialize)]
pub struct Meeting {
    pub meeting_key: u32,
    pub meeting_name: String,
    pub date_start: DateTime<Utc>,
}

impl Meeting {
    /// Pre-season testing shares the meetings table but has no round number.
    pub fn is_testing(&self) -> bool {
        self.meeting_name.to_ascii_lowercase().contains("testing")
    }
}

/// `GET /sessions`
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub session_key: u32,
    pub session_name: String,
}

/// `GET /drivers`
#[derive(Debug, Clone, Deserialize)]
pub struct Driver {
    pub driver_number: u32,
    pub name_acronym: Option<String>,
    pub full_name: Option<String>,
    pub team_name: Option<String>,
}

/// `GET /laps`
#[derive(Debug, Clone, Deserialize)]
pub struct Lap {
    pub driver_number: u32,
    pub lap_number: u32,
    pub date_start: Option<DateTime<Utc>>,
    pub lap_duration: Option<f64>,
    pub duration_sector_1: Option<f64>,
    pub duration_sector_2: Option<f64>,
    pub duration_sector_3: Option<f64>,
}

/// `GET /position`
#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    pub date: DateTime<Utc>,
    pub driver_number: u32,
    pub position: u32,
}

/// `GET /car_data`
#[derive(Debug, Clone, Deserialize)]
pub struct CarData {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub throttle: f64,
    /// 0 or 100
    #[serde(default)]
    pub brake: f64,
    #[serde(default)]
    pub n_gear: u8,
}
