use anyhow::Context;
use trek_domain::config::{ApiConfig, LogConfig};
use trek_kernel::config::load_config;
use trek_logger::Logger;
use trek_server::Server;

#[trek_runtime::main(high_performance)]
async fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig = load_config(std::env::args_os().nth(1))
        .context("Critical: Configuration is malformed")?;
    let _log = init_logger(&cfg.log)?;

    Server::builder().config(cfg).build().await?.run().await
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
