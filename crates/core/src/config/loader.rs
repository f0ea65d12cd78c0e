//! Configuration file loader for the `.vaxsearch/` directory structure.
//!
//! - `config.toml`: search and source settings
//! - `catalogs/*.yaml`, `catalogs/*.yml`, `catalogs/*.json`: searchable data

use crate::config::defaults::default_catalog;
use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::AppConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use vx_protocol::catalog_models::Catalog;
use vx_protocol::config_models::GlobalConfig;
use walkdir::WalkDir;

/// Name of the configuration directory under the root.
pub const CONFIG_DIR: &str = ".vaxsearch";

/// Loads all configuration from the `.vaxsearch/` directory.
///
/// # Arguments
///
/// * `root` - Root directory containing the `.vaxsearch/` folder
///
/// # Returns
///
/// An `AppConfig` with the global settings and the merged catalogs. Missing
/// files fall back to defaults; when no catalog file exists the embedded
/// catalog is used.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - Files exist but cannot be read
/// - Files have invalid TOML, YAML or JSON syntax
/// - A setting is out of range
pub async fn load_config(root: &Path) -> ConfigResult<AppConfig> {
    let vx_dir = root.join(CONFIG_DIR);

    let global = load_global_config(&vx_dir)?;
    let catalog = match load_catalogs(&vx_dir)? {
        Some(catalog) => catalog,
        None => {
            debug!("no catalog files found; using the embedded catalog");
            default_catalog()?
        }
    };

    info!(
        vaccines = catalog.vaccines.len(),
        health_units = catalog.health_units.len(),
        "configuration loaded"
    );

    Ok(AppConfig { global, catalog })
}

/// Loads global configuration from `config.toml`.
fn load_global_config(vx_dir: &Path) -> ConfigResult<GlobalConfig> {
    let config_path = vx_dir.join("config.toml");

    if !config_path.exists() {
        return Ok(GlobalConfig::default());
    }

    let content =
        std::fs::read_to_string(&config_path).map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: GlobalConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    validate(&config, &config_path)?;
    Ok(config)
}

/// Reject settings the search engine cannot work with.
pub fn validate(config: &GlobalConfig, path: &Path) -> ConfigResult<()> {
    let search = &config.search;
    let checks = [
        ("search.min_query_length", search.min_query_length as u64),
        ("search.debounce_ms", search.debounce_ms),
        ("search.fetch_timeout_ms", search.fetch_timeout_ms),
    ];

    for (key, value) in checks {
        if value == 0 {
            return Err(ConfigError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!("{key} must be at least 1"),
            });
        }
    }
    Ok(())
}

/// Loads and merges every catalog file in `catalogs/`, in file name order.
///
/// Returns `None` when there is no catalog file at all.
fn load_catalogs(vx_dir: &Path) -> ConfigResult<Option<Catalog>> {
    let catalogs_dir = vx_dir.join("catalogs");

    if !catalogs_dir.exists() {
        return Ok(None);
    }

    let mut merged: Option<Catalog> = None;

    for entry in WalkDir::new(&catalogs_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = entry.map_err(|source| ConfigError::DirectoryWalk {
            path: catalogs_dir.clone(),
            source,
        })?;

        let path = entry.path();
        let catalog = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => {
                let content = read(path)?;
                serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Some("json") => {
                let content = read(path)?;
                serde_json::from_str(&content).map_err(|source| ConfigError::JsonParse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            _ => continue,
        };

        debug!(path = %path.display(), "loaded catalog");
        merged.get_or_insert_with(Catalog::default).merge(catalog);
    }

    Ok(merged)
}

fn read(path: &Path) -> ConfigResult<String> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: PathBuf::from(path),
        source,
    })
}
