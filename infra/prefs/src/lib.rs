//! # Preferences
//!
//! Persists [`Preferences`] as a small JSON file next to the desktop client.
//!
//! Writes go to a unique temp file which is fsynced and renamed over the target, so a
//! crash leaves either the old or the new file behind. Temp files orphaned by earlier
//! crashes are purged when the store opens.
//!
//! ```rust,no_run
//! use trek_prefs::{PreferenceStore, PrefsError};
//!
//! # async fn run() -> Result<(), PrefsError> {
//! let store = PreferenceStore::open("trek-preferences.json").await?;
//! let prefs = store.toggle_dark_mode().await?;
//! assert!(prefs.dark_mode);
//! # Ok(())
//! # }
//! ```

mod error;
mod maintenance;

pub use crate::error::{PrefsError, PrefsErrorExt};
pub use trek_domain::preferences::Preferences;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Temp files younger than this may belong to a concurrent writer.
const STALE_TMP_AFTER: Duration = Duration::from_secs(300);

#[derive(Debug)]
struct StoreInner {
    path: PathBuf,
    tmp_counter: AtomicU64,
    /// Ticket of the most recently requested save.
    issued: AtomicU64,
    /// Serializes writers. Holds the ticket of the save currently on disk.
    committed: Mutex<u64>,
}

impl StoreInner {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            tmp_counter: AtomicU64::new(1),
            issued: AtomicU64::new(0),
            committed: Mutex::new(0),
        }
    }
}

/// Handle to the preference file. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    inner: Arc<StoreInner>,
}

impl PreferenceStore {
    /// Opens the store at `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// [`PrefsError::InvalidPath`] when `path` has no file name, [`PrefsError::Io`] when the
    /// parent directory cannot be created.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        Self::open_with_threshold(path, STALE_TMP_AFTER).await
    }

    /// Like [`open`](Self::open), purging temp files older than `stale_after`.
    ///
    /// # Errors
    ///
    /// See [`open`](Self::open).
    pub async fn open_with_threshold(
        path: impl Into<PathBuf>,
        stale_after: Duration,
    ) -> Result<Self, PrefsError> {
        let path = path.into();
        if maintenance::tmp_marker(&path).is_none() {
            return Err(PrefsError::InvalidPath {
                message: path.display().to_string().into(),
                context: Some("expected a file path".into()),
            });
        }

        let dir = maintenance::parent_dir(&path);
        fs::create_dir_all(&dir)
            .await
            .context(format!("creating preference directory {}", dir.display()))?;

        maintenance::purge_tmp(&path, stale_after).await;

        Ok(Self { inner: Arc::new(StoreInner::new(path)) })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Reads the preferences. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// [`PrefsError::Io`] for unreadable files, [`PrefsError::Json`] for malformed ones.
    #[instrument(skip(self), fields(path = %self.inner.path.display()))]
    pub async fn load(&self) -> Result<Preferences, PrefsError> {
        let bytes = match fs::read(&self.inner.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No preference file yet, using defaults");
                return Ok(Preferences::default());
            }
            Err(err) => return Err(err).context("reading preferences"),
        };

        serde_json::from_slice::<Preferences>(&bytes).context(self.inner.path.display().to_string())
    }

    /// Atomically replaces the preference file.
    ///
    /// The save is ordered when this method is called, not when the future is first
    /// polled: if an older save finishes after a newer one, the older value is dropped
    /// and the file keeps the newest requested preferences.
    ///
    /// # Errors
    ///
    /// [`PrefsError::Io`] when the temp file cannot be written, synced or renamed.
    pub fn save(
        &self,
        prefs: &Preferences,
    ) -> impl Future<Output = Result<(), PrefsError>> + Send + 'static {
        let ticket = self.inner.issued.fetch_add(1, Ordering::AcqRel) + 1;
        let store = self.clone();
        let prefs = *prefs;
        async move { store.write(ticket, prefs).await }
    }

    #[instrument(skip(self), fields(path = %self.inner.path.display()))]
    async fn write(&self, ticket: u64, prefs: Preferences) -> Result<(), PrefsError> {
        let mut committed = self.inner.committed.lock().await;
        if ticket < *committed {
            debug!(ticket, committed = *committed, "Newer preferences already saved");
            return Ok(());
        }

        let data = serde_json::to_vec_pretty(&prefs).context("encoding preferences")?;
        let target = &self.inner.path;
        let temp = self.unique_tmp_path();

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .await
                .context(format!("creating {}", temp.display()))?;
            file.write_all(&data).await.context("writing preferences")?;
            file.sync_all().await.context("syncing preferences")?;
        }

        if let Err(err) = fs::rename(&temp, target).await {
            let _ = fs::remove_file(&temp).await;
            return Err(err).context(format!("replacing {}", target.display()));
        }

        sync_dir(&maintenance::parent_dir(target)).await;
        *committed = ticket;
        debug!(dark_mode = prefs.dark_mode, "Preferences saved");
        Ok(())
    }

    /// Flips the dark-mode flag and persists the result.
    ///
    /// # Errors
    ///
    /// Any error of [`load`](Self::load) or [`save`](Self::save).
    pub async fn toggle_dark_mode(&self) -> Result<Preferences, PrefsError> {
        let prefs = self.load().await?.toggled();
        self.save(&prefs).await?;
        Ok(prefs)
    }

    fn unique_tmp_path(&self) -> PathBuf {
        let counter = self.inner.tmp_counter.fetch_add(1, Ordering::Relaxed);
        let name = self.inner.path.file_name().and_then(|n| n.to_str()).unwrap_or("preferences");
        self.inner.path.with_file_name(format!("{name}.trektmp.{}.{counter}", std::process::id()))
    }
}

async fn sync_dir(dir: &Path) {
    // Directory handles cannot be fsynced on every platform.
    match fs::File::open(dir).await {
        Ok(handle) => {
            if let Err(err) = handle.sync_all().await {
                warn!(path = %dir.display(), error = %err, "Directory sync failed");
            }
        }
        Err(err) => warn!(path = %dir.display(), error = %err, "Directory open failed"),
    }
}
