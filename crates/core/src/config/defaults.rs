//! Built-in catalog compiled into the binary.
//!
//! With the `debug-embed` feature the asset is read from
//! `crates/core/assets/` at runtime in debug builds, so it can be edited
//! without recompiling.

use rust_embed::RustEmbed;
use vx_protocol::catalog_models::Catalog;

use crate::config::error::{ConfigError, ConfigResult};

/// Name of the built-in catalog asset.
pub const DEFAULT_CATALOG: &str = "default-catalog.yaml";

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/assets"]
struct CatalogAssets;

/// Raw text of an embedded asset.
pub fn get_asset(name: &str) -> Option<String> {
    CatalogAssets::get(name).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// Parse the built-in catalog.
///
/// # Errors
///
/// Returns `ConfigError::EmbeddedCatalog` if the asset is missing or does not
/// parse.
pub fn default_catalog() -> ConfigResult<Catalog> {
    let content = get_asset(DEFAULT_CATALOG).ok_or_else(|| ConfigError::EmbeddedCatalog {
        name: DEFAULT_CATALOG.to_string(),
        reason: "asset not embedded".to_string(),
    })?;

    serde_yaml::from_str(&content).map_err(|e| ConfigError::EmbeddedCatalog {
        name: DEFAULT_CATALOG.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_parses() {
        let catalog = default_catalog().unwrap();

        assert!(!catalog.vaccines.is_empty());
        assert!(!catalog.health_units.is_empty());
        assert!(catalog
            .vaccines
            .iter()
            .any(|v| v.id == 1 && v.name == "CoronaVac"));
    }

    #[test]
    fn test_unknown_asset_is_none() {
        assert!(get_asset("missing.yaml").is_none());
    }
}
