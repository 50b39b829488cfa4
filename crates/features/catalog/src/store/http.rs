use super::{DestinationStore, StoreFuture};
use crate::error::{CatalogError, CatalogErrorExt};
use crate::model::{Destination, DestinationDraft};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct Created {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Catalog served by a remote `trek-server`.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    #[instrument(skip(self), fields(base = %self.base_url))]
    async fn get_all(&self) -> Result<Vec<Destination>, CatalogError> {
        let destinations = self
            .client
            .get(self.url("/destinations.json"))
            .send()
            .await
            .context("requesting destinations")?
            .error_for_status()
            .context("listing destinations")?
            .json::<Vec<Destination>>()
            .await
            .context("decoding destinations")?;

        debug!(count = destinations.len(), "Fetched destinations");
        Ok(destinations)
    }

    #[instrument(skip(self, draft), fields(base = %self.base_url))]
    async fn post(&self, draft: DestinationDraft) -> Result<String, CatalogError> {
        let response = self
            .client
            .post(self.url("/api/destinations"))
            .json(&draft)
            .send()
            .await
            .context("submitting destination")?;

        match response.status() {
            status if status.is_success() => {
                let created = response.json::<Created>().await.context("decoding new id")?;
                Ok(created.id)
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                let body = response.json::<ErrorBody>().await.context("decoding rejection")?;
                Err(CatalogError::Validation { message: body.error.into(), context: None })
            }
            status => Err(CatalogError::Store {
                message: format!("server answered {status}").into(),
                context: Some("submitting destination".into()),
            }),
        }
    }
}

impl DestinationStore for HttpStore {
    fn fetch_all(&self) -> StoreFuture<'_, Vec<Destination>> {
        Box::pin(self.get_all())
    }

    fn append(&self, draft: DestinationDraft) -> StoreFuture<'_, String> {
        Box::pin(self.post(draft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let store = HttpStore::new("http://localhost:4583/");
        assert_eq!(store.base_url(), "http://localhost:4583");
        assert_eq!(store.url("/destinations.json"), "http://localhost:4583/destinations.json");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let store = HttpStore::new("http://127.0.0.1:9");
        let err = store.fetch_all().await.unwrap_err();
        assert!(matches!(err, CatalogError::Http { .. }));
    }
}
