//! On-disk response cache
//!
//! Raw provider responses are stored as files named after the blake3 digest of
//! the request URL, so repeat startups never hit the network for the same
//! session. Entries never expire; delete the directory to force a refetch.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{PaddockError, Result};

/// Directory of cached response bodies keyed by request URL.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
}

impl ResponseCache {
    /// Open a cache rooted at `dir`, creating the directory if it does not exist.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| PaddockError::cache_error(dir.clone(), e))?;
        info!(dir = %dir.display(), "Response cache ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds the response for `url`.
    pub fn entry_path(&self, url: &str) -> PathBuf {
        let digest = blake3::hash(url.as_bytes());
        self.dir.join(format!("{}.json", digest.to_hex()))
    }

    /// Cached body for `url`, or `None` on a miss.
    pub async fn get(&self, url: &str) -> Result<Option<Vec<u8>>> {
        let path = self.entry_path(url);
        match tokio::fs::read(&path).await {
            Ok(body) => {
                debug!(url, bytes = body.len(), "Cache hit");
                Ok(Some(body))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(url, "Cache miss");
                Ok(None)
            }
            Err(e) => Err(PaddockError::cache_error(path, e)),
        }
    }

    /// Store the body for `url`.
    ///
    /// Writes to a temporary file first so a crash never leaves a truncated entry.
    pub async fn put(&self, url: &str, body: &[u8]) -> Result<()> {
        let path = self.entry_path(url);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await.map_err(|e| PaddockError::cache_error(tmp.clone(), e))?;
        tokio::fs::rename(&tmp, &path).await.map_err(|e| PaddockError::cache_error(path, e))?;
        Ok(())
    }
}
