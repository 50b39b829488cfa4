use super::{DestinationStore, StoreFuture};
use crate::error::{CatalogError, CatalogErrorExt};
use crate::model::{Destination, DestinationDraft};
use surrealdb::types::SurrealValue;
use tracing::{debug, instrument};
use trek_database::Database;
use trek_domain::constants::DESTINATION_TABLE;

/// Row shape inside SurrealDB. `created_at` (nanoseconds) keeps load order stable.
#[derive(Debug, SurrealValue)]
struct DestinationRow {
    id: String,
    name: String,
    country: String,
    budget: f64,
    image: String,
    additional_image1: Option<String>,
    additional_image2: Option<String>,
    description: String,
    created_at: i64,
}

impl From<DestinationRow> for Destination {
    fn from(row: DestinationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            country: row.country,
            budget: row.budget,
            image: row.image,
            additional_image1: row.additional_image1,
            additional_image2: row.additional_image2,
            description: row.description,
        }
    }
}

/// Catalog backed by the `destination` table. SurrealDB assigns record ids.
#[derive(Debug, Clone)]
pub struct SurrealStore {
    db: Database,
}

impl SurrealStore {
    /// Wraps the connection and makes sure the table exists.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Database`] when the table cannot be defined.
    pub async fn new(db: Database) -> Result<Self, CatalogError> {
        db.define_table(DESTINATION_TABLE).await.context("preparing catalog table")?;
        Ok(Self { db })
    }

    #[instrument(skip(self))]
    async fn select_all(&self) -> Result<Vec<Destination>, CatalogError> {
        let rows = self
            .db
            .query(format!(
                "SELECT id.id() AS id, name, country, budget, image, additional_image1, \
                 additional_image2, description, created_at \
                 FROM {DESTINATION_TABLE} ORDER BY created_at ASC"
            ))
            .await
            .context("selecting destinations")?
            .take::<Vec<DestinationRow>>(0)
            .context("decoding destinations")?;

        debug!(count = rows.len(), "Destinations loaded");
        Ok(rows.into_iter().map(Destination::from).collect())
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create(&self, draft: DestinationDraft) -> Result<String, CatalogError> {
        let ids = self
            .db
            .query(format!(
                "CREATE {DESTINATION_TABLE} SET name = $name, country = $country, \
                 budget = $budget, image = $image, additional_image1 = $additional_image1, \
                 additional_image2 = $additional_image2, description = $description, \
                 created_at = time::nano(time::now()) RETURN VALUE <string> id.id()"
            ))
            .bind(("name", draft.name))
            .bind(("country", draft.country))
            .bind(("budget", draft.budget))
            .bind(("image", draft.image))
            .bind(("additional_image1", draft.additional_image1))
            .bind(("additional_image2", draft.additional_image2))
            .bind(("description", draft.description))
            .await
            .context("creating destination")?
            .take::<Vec<String>>(0)
            .context("reading assigned id")?;

        ids.into_iter().next().ok_or_else(|| CatalogError::store("store returned no id"))
    }
}

impl DestinationStore for SurrealStore {
    fn fetch_all(&self) -> StoreFuture<'_, Vec<Destination>> {
        Box::pin(self.select_all())
    }

    fn append(&self, draft: DestinationDraft) -> StoreFuture<'_, String> {
        Box::pin(self.create(draft))
    }
}
