//! Search hit models returned by the dashboard's `/busca` endpoints.
//!
//! Field names on the wire follow the REST API (`nome`, `fabricante_nome`,
//! `nome_unidade`), so the same types deserialize API responses and the
//! demo catalog files under `.vaxsearch/catalogs/`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A vaccine as returned by `GET /vacinas/busca`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct VaccineHit {
    /// Vaccine code.
    pub id: u32,

    /// Commercial name, e.g. "CoronaVac".
    #[serde(rename = "nome")]
    pub name: String,

    /// Manufacturer display name.
    #[serde(rename = "fabricante_nome", default)]
    pub manufacturer_name: String,
}

impl VaccineHit {
    /// Label used in inputs: `"<name> (<manufacturer>)"`, or just the name
    /// when the manufacturer is unknown.
    pub fn display_label(&self) -> String {
        if self.manufacturer_name.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.manufacturer_name)
        }
    }
}

/// A health unit (UBS) as returned by `GET /unidades/busca`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
pub struct HealthUnitHit {
    #[ts(type = "string")]
    pub id: Uuid,

    #[serde(rename = "nome_unidade")]
    pub name: String,
}

/// In-memory catalog backing the demo search sources.
///
/// # Example
///
/// ```yaml
/// vaccines:
///   - id: 1
///     nome: CoronaVac
///     fabricante_nome: Sinovac
/// health_units:
///   - id: 5b1f0c9e-2f57-4a53-9a43-2f0d2a1d9c11
///     nome_unidade: UBS Centro
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct Catalog {
    #[serde(default)]
    pub vaccines: Vec<VaccineHit>,

    #[serde(default)]
    pub health_units: Vec<HealthUnitHit>,
}

impl Catalog {
    /// Append all entries of `other` to this catalog.
    pub fn merge(&mut self, other: Catalog) {
        self.vaccines.extend(other.vaccines);
        self.health_units.extend(other.health_units);
    }

    pub fn is_empty(&self) -> bool {
        self.vaccines.is_empty() && self.health_units.is_empty()
    }
}
