//! Configuration models that aggregate all settings.

use serde::Serialize;
use vx_protocol::catalog_models::Catalog;
use vx_protocol::config_models::GlobalConfig;
use vx_protocol::search_models::SearchSettings;

/// Unified application configuration loaded from the `.vaxsearch/` directory.
///
/// # Example
///
/// ```rust,no_run
/// use vx_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!(
///     "Loaded {} vaccines and {} health units",
///     config.catalog.vaccines.len(),
///     config.catalog.health_units.len()
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Settings from `config.toml`.
    pub global: GlobalConfig,

    /// All catalogs merged, or the embedded catalog when none exist.
    pub catalog: Catalog,
}

impl AppConfig {
    pub fn search(&self) -> &SearchSettings {
        &self.global.search
    }
}
