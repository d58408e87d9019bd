//! Flat per-lap export written by the `generate_laps` binary
//!
//! The export is deliberately narrower than [`LapRecord`](crate::LapRecord): it
//! carries only driver, lap number, position and lap time, which is all the
//! static frontend page reads.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::{PaddockError, Result};

/// Default output path, relative to the backend directory.
pub const DEFAULT_EXPORT_PATH: &str = "../public/telemetry.json";

/// One exported lap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LapExportRecord {
    pub driver: String,
    pub lap: u32,
    pub position: Option<u32>,
    pub time: Option<String>,
}

/// Write records as a JSON array, creating the parent directory if needed.
pub async fn write_lap_export(path: impl AsRef<Path>, records: &[LapExportRecord]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PaddockError::file_error(parent.to_path_buf(), e))?;
    }

    let body = serde_json::to_vec(records)?;
    tokio::fs::write(path, body)
        .await
        .map_err(|e| PaddockError::file_error(path.to_path_buf(), e))?;

    info!(path = %path.display(), records = records.len(), "Wrote lap export");
    Ok(())
}
