//! Outcomes the views render: loading progress and detail lookups.

use crate::error::CatalogError;
use crate::model::Destination;

/// Progress of an asynchronous load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    /// The fetch failed; carries a message fit for display.
    Failed(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> LoadState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LoadState<U> {
        match self {
            Self::Loading => LoadState::Loading,
            Self::Ready(value) => LoadState::Ready(f(value)),
            Self::Failed(message) => LoadState::Failed(message),
        }
    }
}

impl<T> From<Result<T, CatalogError>> for LoadState<T> {
    fn from(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// Result of looking a destination up by id.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Lookup {
    /// The lookup has not resolved yet.
    #[default]
    Pending,
    Found(Destination),
    NotFound,
}

impl Lookup {
    /// Scans `destinations` for the first record with `id`.
    #[must_use]
    pub fn resolve(destinations: Vec<Destination>, id: &str) -> Self {
        destinations.into_iter().find(|d| d.id == id).map_or(Self::NotFound, Self::Found)
    }

    #[must_use]
    pub const fn found(&self) -> Option<&Destination> {
        match self {
            Self::Found(destination) => Some(destination),
            _ => None,
        }
    }
}
