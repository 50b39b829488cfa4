//! Layered configuration: a base file plus `TREK__` environment overrides.

use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix of environment overrides, e.g. `TREK__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "TREK";
/// Separator between the prefix and nested keys.
pub const ENV_SEPARATOR: &str = "__";
/// Base file looked up (with any supported extension) when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "trek";

#[trek_derive::trek_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a configuration file overlaid with `TREK__*` environment variables.
///
/// An explicit `path` must exist; its format follows the extension (TOML, JSON, YAML, ...).
/// Without a path, an optional `trek.*` file in the working directory is used, so a
/// missing file yields the defaults of `T`.
///
/// # Errors
///
/// Fails when an explicit file is missing or the merged values do not fit `T`.
///
/// ```rust
/// use trek_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct Settings {
///     port: u16,
/// }
///
/// let settings: Settings = load_config(None::<&str>).unwrap();
/// # let _ = settings.port;
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, environment())
}

pub(crate) fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
        .convert_case(config::Case::Snake)
}

pub(crate) fn load_layered<T>(
    path: Option<impl AsRef<Path>>,
    environment: Environment,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match &path {
        Some(path) => {
            info!(path = %path.as_ref().display(), "Loading configuration");
            File::from(path.as_ref()).required(true)
        }
        None => {
            info!(name = DEFAULT_CONFIG_NAME, "Loading optional configuration");
            File::with_name(DEFAULT_CONFIG_NAME).required(false)
        }
    };

    Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")
}
