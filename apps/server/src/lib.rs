//! # Trek Server
//!
//! Serves the destination catalog over REST. Records live in SurrealDB; the engine is
//! picked by `database.url` (`mem://`, `rocksdb://`, `ws://`, ...).
//!
//! ```no_run
//! use trek_domain::config::ApiConfig;
//! use trek_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Server::builder()
//!         .config(ApiConfig::default())
//!         .seed("data/destinations.json")
//!         .build()
//!         .await?
//!         .run()
//!         .await
//! }
//! ```

mod router;
mod shutdown;

use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use trek_catalog::service::seed_if_empty;
use trek_catalog::store::SurrealStore;
use trek_database::Database;
use trek_domain::config::{ApiConfig, SslConfig};
use trek_kernel::server::state::ApiState;

#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    cfg: ApiConfig,
}

impl ServerBuilder {
    pub fn config(mut self, cfg: ApiConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Imports this JSON file when the catalog starts empty.
    pub fn seed(mut self, path: impl Into<PathBuf>) -> Self {
        self.cfg.catalog.seed = Some(path.into());
        self
    }

    /// Checks TLS material, opens the catalog store and registers the catalog slice.
    ///
    /// # Errors
    ///
    /// * SSL certificate or key missing.
    /// * Database unreachable or credentials rejected.
    /// * Seed file unreadable or malformed.
    pub async fn build(self) -> Result<Server> {
        if let Some(ssl) = &self.cfg.server.ssl {
            check_tls_material(ssl)?;
        }

        let store = open_store(&self.cfg).await?;
        let state = ApiState::builder()
            .config(self.cfg)
            .register_slice(trek_catalog::init(Arc::new(store)))
            .build()
            .context("Failed to finalize API state registry")?;

        Ok(Server { state })
    }
}

/// Connects to SurrealDB, prepares the destination table and applies the seed file.
async fn open_store(cfg: &ApiConfig) -> Result<SurrealStore> {
    let db_cfg = &cfg.database;
    let mut builder =
        Database::builder().url(&db_cfg.url).session(&db_cfg.namespace, &db_cfg.database);
    if let Some(creds) = &db_cfg.credentials {
        builder = builder.auth(&creds.username, &creds.password);
    }

    let db = builder.init().await.with_context(|| format!("Failed to connect to {}", db_cfg.url))?;
    let store = SurrealStore::new(db).await.context("Failed to prepare catalog store")?;

    if let Some(seed) = &cfg.catalog.seed {
        seed_if_empty(&store, seed)
            .await
            .with_context(|| format!("Failed to seed catalog from {}", seed.display()))?;
    }

    Ok(store)
}

fn check_tls_material(ssl: &SslConfig) -> Result<()> {
    for (label, path) in [("certificate", &ssl.cert), ("key", &ssl.key)] {
        anyhow::ensure!(path.is_file(), "SSL {label} not found at: {}", path.display());
    }
    warn_if_exposed(&ssl.key)
}

#[cfg(unix)]
fn warn_if_exposed(key: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = key.metadata().context("Failed to stat SSL key")?.permissions().mode();
    if mode & 0o077 != 0 {
        tracing::warn!(key = %key.display(), mode = format!("{mode:o}"), "SSL key is readable by others");
    }
    Ok(())
}

#[cfg(not(unix))]
fn warn_if_exposed(_key: &Path) -> Result<()> {
    Ok(())
}

/// Catalog server ready to accept connections.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The complete application router, without binding a socket.
    #[must_use]
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }

    /// Serves until Ctrl+C or SIGTERM, then drains open connections.
    ///
    /// # Errors
    ///
    /// Binding the address or loading the PEM files fails.
    pub async fn run(self) -> Result<()> {
        let server_cfg = self.state.config.server.clone();
        let address = SocketAddr::new(server_cfg.address, server_cfg.port);
        let app = self.router().into_make_service();

        let handle = Handle::<SocketAddr>::new();
        tokio::spawn(shutdown::watch(handle.clone()));

        match &server_cfg.ssl {
            Some(ssl) => {
                let tls = RustlsConfig::from_pem_file(&ssl.cert, &ssl.key)
                    .await
                    .context("Failed to load SSL/TLS certificates")?;
                info!(%address, "Serving catalog over HTTPS");
                axum_server::bind_rustls(address, tls)
                    .handle(handle)
                    .serve(app)
                    .await
                    .context("HTTPS server failed")?;
            }
            None => {
                info!(%address, "Serving catalog over HTTP");
                axum_server::bind(address)
                    .handle(handle)
                    .serve(app)
                    .await
                    .context("HTTP server failed")?;
            }
        }

        info!("Server stopped");
        Ok(())
    }
}
