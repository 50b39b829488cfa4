//! The narrow read/append interface every catalog backend implements.

mod memory;
#[cfg(feature = "client")]
mod http;
#[cfg(feature = "server")]
mod surreal;

pub use memory::MemoryStore;
#[cfg(feature = "client")]
pub use http::HttpStore;
#[cfg(feature = "server")]
pub use surreal::SurrealStore;

use crate::error::CatalogError;
use crate::model::{Destination, DestinationDraft};
use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`DestinationStore`] methods, keeping the trait object safe.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CatalogError>> + Send + 'a>>;

/// Keyed remote collection of destinations.
pub trait DestinationStore: Debug + Send + Sync {
    /// Reads the whole collection in load order.
    fn fetch_all(&self) -> StoreFuture<'_, Vec<Destination>>;

    /// Appends a record and returns the identifier the store assigned to it.
    fn append(&self, draft: DestinationDraft) -> StoreFuture<'_, String>;
}
