//! # Database
//!
//! Opens the [SurrealDB](https://surrealdb.com) connection used by the catalog server.
//!
//! The `any` engine accepts `mem://`, `rocksdb://` (with `storage-rocksdb`), `ws://` and
//! `http://` URLs, so the same binary runs against an embedded store in tests and a
//! remote cluster in production.
//!
//! ```rust,no_run
//! use trek_database::{Database, DatabaseError};
//!
//! # async fn run() -> Result<(), DatabaseError> {
//! let db = Database::builder().url("mem://").session("trek", "catalog").init().await?;
//! db.define_table("destination").await?;
//! # Ok(())
//! # }
//! ```

mod error;

pub use error::{DatabaseError, DatabaseErrorExt};

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use surrealdb::Surreal;
use surrealdb::engine::any::{Any, connect};
use surrealdb::opt::auth::Root;
use tracing::{debug, info, instrument, warn};

const HEALTH_ATTEMPTS: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct DatabaseInner {
    instance: Surreal<Any>,
    namespace: String,
    database: String,
}

impl Drop for DatabaseInner {
    fn drop(&mut self) {
        info!(ns = %self.namespace, db = %self.database, "SurrealDB handle dropped");
    }
}

/// Shared connection handle. Derefs to the underlying [`Surreal`] client.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<DatabaseInner>,
}

impl Database {
    pub fn builder() -> DatabaseBuilder {
        DatabaseBuilder::default()
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    #[must_use]
    pub fn database(&self) -> &str {
        &self.inner.database
    }

    /// Declares a schemaless table unless it already exists.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Validation`] for names that are not plain identifiers and
    /// [`DatabaseError::Surreal`] when the statement fails.
    #[instrument(skip(self))]
    pub async fn define_table(&self, table: &str) -> Result<(), DatabaseError> {
        if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DatabaseError::Validation {
                message: format!("'{table}' is not a valid table name").into(),
                context: None,
            });
        }

        self.inner
            .instance
            .query(format!("DEFINE TABLE IF NOT EXISTS {table} SCHEMALESS"))
            .await
            .context(format!("Defining table {table}"))?
            .check()
            .map_err(surrealdb::Error::from)?;

        debug!(table, "Table ready");
        Ok(())
    }
}

impl Deref for Database {
    type Target = Surreal<Any>;

    fn deref(&self) -> &Self::Target {
        &self.inner.instance
    }
}

#[must_use = "builders do nothing unless you call .init()"]
#[derive(Debug, Default)]
pub struct DatabaseBuilder {
    url: Option<String>,
    namespace: Option<String>,
    database: Option<String>,
    credentials: Option<(String, String)>,
}

impl DatabaseBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn session(mut self, namespace: impl Into<String>, database: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self.database = Some(database.into());
        self
    }

    /// Signs in as a root user after the engine is healthy.
    pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Connects, waits for the engine to become healthy, signs in and selects the session.
    ///
    /// Health is probed up to three times with exponential backoff starting at 500 ms.
    ///
    /// # Errors
    ///
    /// * [`DatabaseError::Validation`] when the URL, namespace or database is missing.
    /// * [`DatabaseError::Connection`] when the engine fails to start or stays unhealthy.
    /// * [`DatabaseError::Auth`] when the credentials are rejected.
    /// * [`DatabaseError::Surreal`] when the session cannot be selected.
    #[instrument(skip(self), fields(url = self.url, ns = self.namespace, db = self.database))]
    pub async fn init(self) -> Result<Database, DatabaseError> {
        let url = self.url.filter(|u| !u.trim().is_empty()).ok_or(DatabaseError::missing("url"))?;
        let namespace = self.namespace.ok_or(DatabaseError::missing("namespace"))?;
        let database = self.database.ok_or(DatabaseError::missing("database"))?;

        let instance = connect(&url).await.map_err(|e| DatabaseError::Connection {
            message: e.to_string().into(),
            context: Some("Starting engine".into()),
        })?;

        wait_until_healthy(&instance, &url).await?;

        if let Some((username, password)) = self.credentials {
            instance.signin(Root { username, password }).await.map_err(|e| {
                DatabaseError::Auth { message: e.to_string().into(), context: Some(url.clone().into()) }
            })?;
        }

        instance.use_ns(&namespace).use_db(&database).await.context("Selecting session")?;

        let version =
            instance.version().await.map_or_else(|_| "unknown".to_owned(), |v| v.to_string());
        info!(%namespace, %database, %version, "SurrealDB connection established");

        Ok(Database { inner: Arc::new(DatabaseInner { instance, namespace, database }) })
    }
}

async fn wait_until_healthy(instance: &Surreal<Any>, url: &str) -> Result<(), DatabaseError> {
    let mut delay = INITIAL_BACKOFF;
    for attempt in 1..=HEALTH_ATTEMPTS {
        if instance.health().await.is_ok() {
            return Ok(());
        }
        if attempt < HEALTH_ATTEMPTS {
            warn!(attempt, ?delay, "Database not ready, retrying");
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }

    Err(DatabaseError::Connection {
        message: "unhealthy after retries".into(),
        context: Some(url.to_owned().into()),
    })
}
