//! Formula 1 session snapshots from OpenF1, served over HTTP.
//!
//! Paddock loads one session (lap table, driver list, car telemetry) from the
//! OpenF1 API, caches the raw responses on disk, and reshapes them into a flat
//! [`SessionSnapshot`] that a frontend can consume as JSON.
//!
//! # Features
//!
//! - **Disk Cache**: repeat loads of the same session never touch the network
//! - **Typed Snapshot**: optional fields are `Option`, telemetry channels are
//!   always the same length
//! - **One Endpoint**: `GET /telemetry` over an immutable, pre-built snapshot
//!
//! ## Example
//!
//! ```rust,no_run
//! use paddock::{Paddock, ProviderConfig, SessionId};
//!
//! #[tokio::main]
//! async fn main() -> paddock::Result<()> {
//!     let provider = Paddock::openf1(&ProviderConfig::default()).await?;
//!     let snapshot = Paddock::snapshot(&provider, &SessionId::BAHRAIN_2024).await?;
//!
//!     for series in &snapshot.telemetry {
//!         println!("{}: {} samples", series.driver(), series.len());
//!     }
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Session loading
pub mod cache;
pub mod config;
pub mod provider;
pub mod providers;
pub mod session;

// Snapshot construction and output
pub mod export;
pub mod server;
pub mod snapshot;
pub mod transform;

// Core exports
pub use error::*;
pub use types::{SessionId, SessionKind};

pub use config::ProviderConfig;
pub use export::LapExportRecord;
pub use provider::SessionProvider;
pub use providers::OpenF1Provider;
pub use session::LoadedSession;
pub use snapshot::{LapRecord, SessionSnapshot, TelemetrySeries};
pub use transform::{build_snapshot, export_laps};

/// Unified entry point for loading sessions.
pub struct Paddock;

impl Paddock {
    /// Create an OpenF1 provider, opening the response cache directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache directory cannot be created or the HTTP
    /// client cannot be built.
    pub async fn openf1(config: &ProviderConfig) -> Result<OpenF1Provider> {
        OpenF1Provider::from_config(config).await
    }

    /// Load a session and build its snapshot in one step.
    ///
    /// # Errors
    ///
    /// Any provider failure is returned as-is; no partial snapshot is built.
    pub async fn snapshot<P>(provider: &P, id: &SessionId) -> Result<SessionSnapshot>
    where
        P: SessionProvider + ?Sized,
    {
        let session = provider.load(id).await?;
        Ok(build_snapshot(&session))
    }

    /// Load a session and project it into the flat lap export.
    pub async fn lap_export<P>(provider: &P, id: &SessionId) -> Result<Vec<LapExportRecord>>
    where
        P: SessionProvider + ?Sized,
    {
        let session = provider.load(id).await?;
        Ok(export_laps(&session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    struct FixtureProvider;

    #[async_trait::async_trait]
    impl SessionProvider for FixtureProvider {
        async fn load(&self, _id: &SessionId) -> Result<LoadedSession> {
            Ok(test_utils::fixture_session())
        }
    }

    struct FailingProvider;

    #[async_trait::async_trait]
    impl SessionProvider for FailingProvider {
        async fn load(&self, id: &SessionId) -> Result<LoadedSession> {
            Err(PaddockError::session_not_found(*id))
        }
    }

    #[tokio::test]
    async fn snapshot_and_export_share_the_lap_table() {
        let id = SessionId::BAHRAIN_2024;
        let snapshot = Paddock::snapshot(&FixtureProvider, &id).await.unwrap();
        let export = Paddock::lap_export(&FixtureProvider, &id).await.unwrap();

        assert_eq!(snapshot.laps.len(), export.len());
        for (lap, row) in snapshot.laps.iter().zip(&export) {
            assert_eq!(lap.driver, row.driver);
            assert_eq!(lap.lap_number, row.lap);
            assert_eq!(lap.position, row.position);
            assert_eq!(lap.lap_time, row.time);
        }
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider: Box<dyn SessionProvider> = Box::new(FailingProvider);
        let err = Paddock::snapshot(provider.as_ref(), &SessionId::BAHRAIN_2024).await.unwrap_err();
        assert!(matches!(err, PaddockError::SessionNotFound { .. }));
    }
}
