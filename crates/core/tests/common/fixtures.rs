//! Test fixtures for sample catalogs and configuration directories.

use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use uuid::Uuid;
use vx_protocol::catalog_models::{HealthUnitHit, VaccineHit};

#[allow(dead_code)]
pub fn vaccine(id: u32, name: &str, manufacturer: &str) -> VaccineHit {
    VaccineHit {
        id,
        name: name.to_string(),
        manufacturer_name: manufacturer.to_string(),
    }
}

/// `{ id: 1, nome: "CoronaVac" }` without a manufacturer, so its label is
/// just the name.
#[allow(dead_code)]
pub fn coronavac() -> VaccineHit {
    vaccine(1, "CoronaVac", "")
}

#[allow(dead_code)]
pub fn health_unit(name: &str) -> HealthUnitHit {
    HealthUnitHit {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

/// Create a temporary project with a `.vaxsearch/` directory.
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project(config_toml: &str, catalog_yaml: &str) -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let vx_dir = temp_dir.path().join(".vaxsearch");

    std::fs::create_dir_all(vx_dir.join("catalogs"))?;
    std::fs::write(vx_dir.join("config.toml"), config_toml)?;
    std::fs::write(vx_dir.join("catalogs/demo.yaml"), catalog_yaml)?;

    Ok(temp_dir)
}

/// Records every `on_commit` notification.
pub struct Commits<T> {
    log: Arc<Mutex<Vec<Option<T>>>>,
}

impl<T> Clone for Commits<T> {
    fn clone(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
        }
    }
}

#[allow(dead_code)]
impl<T: Clone + Send + 'static> Commits<T> {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Callback to hand to `SearchSelect::on_commit`.
    pub fn recorder(&self) -> impl FnMut(Option<&T>) + Send + 'static {
        let log = Arc::clone(&self.log);
        move |item: Option<&T>| log.lock().unwrap().push(item.cloned())
    }

    pub fn all(&self) -> Vec<Option<T>> {
        self.log.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.log.lock().unwrap().len()
    }
}
