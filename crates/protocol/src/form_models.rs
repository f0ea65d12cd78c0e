//! Form state accumulated from search-select commits.
//!
//! A search-select control in tag mode never keeps the list of picked items
//! itself; the owning form does. `CampaignDraft` is that owner-side list for
//! the campaign form.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog_models::{HealthUnitHit, VaccineHit};

/// Values collected by the campaign form.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, TS)]
pub struct CampaignDraft {
    /// Health unit running the campaign (single selection).
    pub health_unit: Option<HealthUnitHit>,

    /// Vaccines offered by the campaign, in the order they were picked.
    pub vaccines: Vec<VaccineHit>,
}

impl CampaignDraft {
    /// Add a vaccine unless one with the same id is already listed.
    ///
    /// Returns `true` if the vaccine was added.
    pub fn add_vaccine(&mut self, vaccine: VaccineHit) -> bool {
        if self.vaccines.iter().any(|v| v.id == vaccine.id) {
            return false;
        }
        self.vaccines.push(vaccine);
        true
    }

    /// Remove the most recently added vaccine.
    pub fn remove_last_vaccine(&mut self) -> Option<VaccineHit> {
        self.vaccines.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.health_unit.is_none() && self.vaccines.is_empty()
    }

    /// Serialize the draft the way the API's `POST /campanhas` body is logged.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
