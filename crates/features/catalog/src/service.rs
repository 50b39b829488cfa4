//! Catalog Loader, Detail Lookup and Record Writer.
//!
//! Each operation talks to the store directly. Nothing is cached between calls, so the
//! detail view always re-reads the collection.

use crate::error::CatalogError;
use crate::model::{Destination, DestinationDraft};
use crate::state::Lookup;
use crate::store::DestinationStore;
use tracing::{debug, info, instrument};

/// Reads the full collection once, in load order.
///
/// # Errors
///
/// Whatever the store reports; there is no retry.
#[instrument(skip_all)]
pub async fn load(store: &dyn DestinationStore) -> Result<Vec<Destination>, CatalogError> {
    let destinations = store.fetch_all().await?;
    debug!(count = destinations.len(), "Catalog loaded");
    Ok(destinations)
}

/// Re-fetches the collection and scans for `id`.
///
/// # Errors
///
/// Fetch failures are returned as errors, distinct from [`Lookup::NotFound`].
#[instrument(skip(store))]
pub async fn lookup(store: &dyn DestinationStore, id: &str) -> Result<Lookup, CatalogError> {
    let destinations = store.fetch_all().await?;
    Ok(Lookup::resolve(destinations, id))
}

/// Validates `draft` and appends it, returning the store-assigned id.
///
/// # Errors
///
/// [`CatalogError::Validation`] leaves the store untouched. Store failures pass through.
#[instrument(skip_all, fields(name = %draft.name))]
pub async fn submit(
    store: &dyn DestinationStore,
    draft: DestinationDraft,
) -> Result<String, CatalogError> {
    draft.validate()?;
    let id = store.append(draft).await?;
    info!(%id, "Destination added");
    Ok(id)
}

#[cfg(feature = "server")]
pub use seed::seed_if_empty;

#[cfg(feature = "server")]
mod seed {
    use super::{CatalogError, DestinationDraft, DestinationStore, submit};
    use crate::error::CatalogErrorExt;
    use std::path::Path;
    use tracing::{info, warn};

    /// Imports a JSON array of destinations when the store holds nothing yet.
    ///
    /// Ids in the file are ignored. Entries that fail validation are skipped with a
    /// warning. Returns how many records were appended.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Io`] or [`CatalogError::Json`] when the file is unreadable, and
    /// store failures while appending.
    pub async fn seed_if_empty(
        store: &dyn DestinationStore,
        path: &Path,
    ) -> Result<usize, CatalogError> {
        if !store.fetch_all().await?.is_empty() {
            info!(path = %path.display(), "Catalog already populated, skipping seed");
            return Ok(0);
        }

        let raw = tokio::fs::read(path).await.context(path.display().to_string())?;
        let drafts: Vec<DestinationDraft> =
            serde_json::from_slice(&raw).context(path.display().to_string())?;

        let mut imported = 0;
        for (index, draft) in drafts.into_iter().enumerate() {
            match submit(store, draft).await {
                Ok(_) => imported += 1,
                Err(CatalogError::Validation { message, .. }) => {
                    warn!(index, %message, "Skipping invalid seed entry");
                }
                Err(err) => return Err(err),
            }
        }

        info!(imported, path = %path.display(), "Catalog seeded");
        Ok(imported)
    }
}
