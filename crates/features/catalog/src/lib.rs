//! # Catalog
//!
//! The travel-destination catalog slice.
//!
//! * [`filter`]: the Filter Engine and the derived country options.
//! * [`service`]: Catalog Loader, Detail Lookup and Record Writer over any
//!   [`DestinationStore`].
//! * [`store`]: the in-memory store, plus SurrealDB (`server`) and HTTP (`client`) backends.
//! * `api` (`server`): REST handlers mounted by `trek-server`.

#[cfg(feature = "server")]
pub mod api;
mod error;
pub mod filter;
pub mod model;
pub mod service;
pub mod state;
pub mod store;

pub use error::{CatalogError, CatalogErrorExt};
pub use filter::{DestinationFilter, country_options};
pub use model::{Destination, DestinationDraft};
pub use state::{LoadState, Lookup};
pub use store::{DestinationStore, MemoryStore};

use std::sync::Arc;
use trek_kernel::domain::registry::InitializedSlice;

/// Catalog state registered in the server.
#[trek_derive::trek_slice]
pub struct Catalog {
    pub store: Arc<dyn DestinationStore>,
}

/// Builds the catalog slice around `store`.
#[must_use]
pub fn init(store: Arc<dyn DestinationStore>) -> InitializedSlice {
    tracing::info!(?store, "Catalog slice initialized");
    InitializedSlice::new(Catalog::new(CatalogInner { store }))
}
