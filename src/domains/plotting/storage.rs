//! Best-effort persistence of rendered plots.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::StorageError;

/// Where a rendered image was (or was not) saved.
#[derive(Debug, Clone, PartialEq)]
pub enum Persistence {
    Saved(PathBuf),
    Failed(String),
    /// Persistence is disabled.
    Skipped,
}

impl Persistence {
    /// The sentence appended to a tool's status text, if any.
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Saved(path) => Some(format!("Saved to {}.", path.display())),
            Self::Failed(reason) => Some(format!("Could not persist the plot: {}.", reason)),
            Self::Skipped => None,
        }
    }
}

/// Stores rendered images.
#[async_trait]
pub trait PlotStore: Send + Sync {
    /// Save `bytes` under a unique name starting with `prefix`.
    async fn save(&self, prefix: &str, bytes: &[u8]) -> Result<PathBuf, StorageError>;
}

/// Save through `store`, turning failures into [`Persistence::Failed`].
pub async fn persist(store: Option<&dyn PlotStore>, prefix: &str, bytes: &[u8]) -> Persistence {
    let Some(store) = store else {
        return Persistence::Skipped;
    };
    match store.save(prefix, bytes).await {
        Ok(path) => {
            info!("Plot saved to {}", path.display());
            Persistence::Saved(path)
        }
        Err(e) => {
            warn!("Could not persist plot: {}", e);
            Persistence::Failed(e.to_string())
        }
    }
}

/// Writes `<prefix>_<YYYYmmddHHMMSS>_<8 hex>.png` files into one directory.
#[derive(Debug, Clone)]
pub struct FsPlotStore {
    dir: PathBuf,
}

impl FsPlotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(prefix: &str) -> String {
        let timestamp = Local::now().format("%Y%m%d%H%M%S");
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}_{}_{}.png", prefix, timestamp, &suffix[..8])
    }
}

#[async_trait]
impl PlotStore for FsPlotStore {
    async fn save(&self, prefix: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: self.dir.display().to_string(),
                source,
            })?;

        let path = self.dir.join(Self::file_name(prefix));
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.display().to_string(),
                source,
            })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_name_format() {
        let name = FsPlotStore::file_name("multi_plot");
        let rest = name.strip_prefix("multi_plot_").unwrap();
        let rest = rest.strip_suffix(".png").unwrap();
        let (timestamp, suffix) = rest.split_once('_').unwrap();
        assert_eq!(timestamp.len(), 14);
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_save_creates_directory() {
        let temp = TempDir::new().unwrap();
        let store = FsPlotStore::new(temp.path().join("nested").join("plots"));

        let first = store.save("plot", b"png").await.unwrap();
        let second = store.save("plot", b"png").await.unwrap();
        assert_ne!(first, second);
        assert_eq!(std::fs::read(&first).unwrap(), b"png");
    }

    #[tokio::test]
    async fn test_persist_reports_failure() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, b"").unwrap();
        let store = FsPlotStore::new(blocker.join("plots"));

        let outcome = persist(Some(&store), "plot", b"png").await;
        match &outcome {
            Persistence::Failed(reason) => assert!(reason.contains("Could not create")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(outcome.notice().unwrap().starts_with("Could not persist the plot:"));
    }

    #[tokio::test]
    async fn test_persist_without_store_is_skipped() {
        assert_eq!(persist(None, "plot", b"png").await, Persistence::Skipped);
        assert_eq!(Persistence::Skipped.notice(), None);
    }
}
