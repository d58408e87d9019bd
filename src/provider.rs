//! Provider trait for session data sources

use crate::Result;
use crate::session::LoadedSession;
use crate::types::SessionId;

/// Trait for session data sources
///
/// A provider turns a [`SessionId`] into a fully parsed [`LoadedSession`]:
/// lap table, driver list and car data. Providers own their transport and any
/// caching; callers see either a complete session or an error.
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    /// Load a session.
    ///
    /// Returns:
    /// - `Ok(session)` - Every table needed to build a snapshot
    /// - `Err(e)` - Network, cache or parse failure; nothing partial is returned
    async fn load(&self, id: &SessionId) -> Result<LoadedSession>;
}
