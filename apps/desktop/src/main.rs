use anyhow::Context;
use std::sync::Arc;
use tracing::warn;
use trek_catalog::store::HttpStore;
use trek_desktop::{Backend, DesktopApp};
use trek_domain::config::{ClientConfig, LogConfig};
use trek_kernel::config::load_config;
use trek_logger::Logger;
use trek_prefs::PreferenceStore;
use trek_runtime::{RuntimeConfig, build_runtime_with_config};

fn main() -> anyhow::Result<()> {
    let cfg: ClientConfig = load_config(std::env::args_os().nth(1))
        .context("Critical: Configuration is malformed")?;
    let _log = init_logger(&cfg.log)?;

    // The window owns the main thread; catalog requests and preference writes run here.
    let runtime = build_runtime_with_config(&RuntimeConfig::memory_efficient())?;

    let prefs = runtime
        .block_on(PreferenceStore::open(cfg.preferences.clone()))
        .context("Failed to open preference file")?;
    let initial = runtime.block_on(prefs.load()).unwrap_or_else(|err| {
        warn!(error = %err, "Unreadable preferences, falling back to defaults");
        trek_prefs::Preferences::default()
    });

    let store = Arc::new(HttpStore::new(cfg.api_url.clone()));
    let backend = Backend::new(store, prefs, runtime.handle().clone());

    DesktopApp::from_config(&cfg.window).launch(backend, initial);
    Ok(())
}

fn init_logger(log: &LogConfig) -> anyhow::Result<Logger> {
    let builder = Logger::builder().name(env!("CARGO_PKG_NAME")).env_filter(&log.level);
    let logger = match &log.directory {
        Some(directory) if log.json => builder.path(directory).json().init(),
        Some(directory) => builder.path(directory).init(),
        None => builder.init(),
    };
    logger.context("Failed to initialize logging")
}
