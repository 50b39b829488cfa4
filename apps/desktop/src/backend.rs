use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinError;
use trek_catalog::{CatalogError, Destination, DestinationDraft, DestinationStore, Lookup, service};
use trek_domain::preferences::Preferences;
use trek_prefs::{PreferenceStore, PrefsError};

/// Catalog and preference access for the views.
///
/// Every call runs on the client runtime, so the UI event loop never drives network or
/// file I/O itself.
#[derive(Debug, Clone)]
pub struct Backend {
    store: Arc<dyn DestinationStore>,
    prefs: PreferenceStore,
    runtime: Handle,
}

impl Backend {
    #[must_use]
    pub fn new(store: Arc<dyn DestinationStore>, prefs: PreferenceStore, runtime: Handle) -> Self {
        Self { store, prefs, runtime }
    }

    async fn spawn<T>(
        &self,
        task: impl Future<Output = T> + Send + 'static,
    ) -> Result<T, JoinError>
    where
        T: Send + 'static,
    {
        self.runtime.spawn(task).await
    }

    /// # Errors
    ///
    /// Store failures, or [`CatalogError::Internal`] if the task was cancelled.
    pub async fn destinations(&self) -> Result<Vec<Destination>, CatalogError> {
        let store = Arc::clone(&self.store);
        self.spawn(async move { service::load(store.as_ref()).await }).await.map_err(internal)?
    }

    /// # Errors
    ///
    /// Store failures. An unknown id is [`Lookup::NotFound`], not an error.
    pub async fn lookup(&self, id: String) -> Result<Lookup, CatalogError> {
        let store = Arc::clone(&self.store);
        self.spawn(async move { service::lookup(store.as_ref(), &id).await })
            .await
            .map_err(internal)?
    }

    /// # Errors
    ///
    /// [`CatalogError::Validation`] for incomplete drafts, store failures otherwise.
    pub async fn submit(&self, draft: DestinationDraft) -> Result<String, CatalogError> {
        let store = Arc::clone(&self.store);
        self.spawn(async move { service::submit(store.as_ref(), draft).await })
            .await
            .map_err(internal)?
    }

    /// Starts persisting `prefs` immediately on the client runtime.
    ///
    /// Saves are ordered by call: when toggles overlap, the file ends up holding the
    /// value of the last call.
    ///
    /// # Errors
    ///
    /// [`PrefsError::Io`] when the file cannot be replaced.
    pub fn save_preferences(
        &self,
        prefs: Preferences,
    ) -> impl Future<Output = Result<(), PrefsError>> + Send + 'static {
        let task = self.runtime.spawn(self.prefs.save(&prefs));
        async move { task.await.map_err(|err| PrefsError::from(std::io::Error::other(err)))? }
    }
}

fn internal(err: JoinError) -> CatalogError {
    CatalogError::from(format!("background task failed: {err}"))
}
