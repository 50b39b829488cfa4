use super::{DestinationStore, StoreFuture};
use crate::model::{Destination, DestinationDraft};
use parking_lot::RwLock;
use std::sync::Arc;
use trek_kernel::safe_nanoid;

/// In-process store keeping records in insertion order. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<Destination>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with existing records, ids included.
    #[must_use]
    pub fn with_records(records: Vec<Destination>) -> Self {
        Self { records: Arc::new(RwLock::new(records)) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl DestinationStore for MemoryStore {
    fn fetch_all(&self) -> StoreFuture<'_, Vec<Destination>> {
        Box::pin(async move { Ok(self.records.read().clone()) })
    }

    fn append(&self, draft: DestinationDraft) -> StoreFuture<'_, String> {
        Box::pin(async move {
            let id = safe_nanoid!();
            self.records.write().push(draft.into_destination(id.clone()));
            Ok(id)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_assigns_unique_ids_and_keeps_order() {
        let store = MemoryStore::new();
        let first = store
            .append(DestinationDraft { name: "One".to_owned(), ..DestinationDraft::default() })
            .await
            .unwrap();
        let second = store
            .append(DestinationDraft { name: "Two".to_owned(), ..DestinationDraft::default() })
            .await
            .unwrap();

        assert_ne!(first, second);
        let all = store.fetch_all().await.unwrap();
        assert_eq!(all.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(), ["One", "Two"]);
        assert_eq!(all[0].id, first);
    }

    #[tokio::test]
    async fn clones_share_records() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.append(DestinationDraft::default()).await.unwrap();
        assert_eq!(store.len(), 1);
    }
}
