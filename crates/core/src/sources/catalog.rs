//! In-memory catalog search.
//!
//! Matches the way the dashboard's `/busca` endpoints behave: case- and
//! accent-insensitive substring search, at most ten hits, prefix matches
//! first.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use vx_protocol::catalog_models::{HealthUnitHit, VaccineHit};

use crate::search::source::{SearchSource, SourceError};

/// Hit limit of the `/busca` endpoints.
pub const DEFAULT_RESULT_LIMIT: usize = 10;

type LabelFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

pub struct CatalogSource<T> {
    items: Vec<T>,
    label: LabelFn<T>,
    latency: Duration,
    limit: usize,
}

impl<T> CatalogSource<T> {
    /// Search `items` by the text `label` extracts from each of them.
    pub fn new<L>(items: Vec<T>, label: L) -> Self
    where
        L: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            items,
            label: Arc::new(label),
            latency: Duration::ZERO,
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    /// Delay every answer by `latency`, like a network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> CatalogSource<T> {
    /// Synchronous matching, without the simulated latency.
    pub fn matches(&self, query: &str) -> Vec<T> {
        let needle = fold(query.trim());

        let mut ranked: Vec<(bool, String, &T)> = self
            .items
            .iter()
            .filter_map(|item| {
                let label = (self.label)(item);
                let folded = fold(&label);
                let position = folded.find(&needle)?;
                Some((position != 0, folded, item))
            })
            .collect();

        // Prefix hits first, then alphabetical; the sort is stable for ties.
        ranked.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
        ranked
            .into_iter()
            .take(self.limit)
            .map(|(_, _, item)| item.clone())
            .collect()
    }
}

impl CatalogSource<VaccineHit> {
    /// Vaccines searched by their `"<name> (<manufacturer>)"` label.
    pub fn vaccines(items: Vec<VaccineHit>) -> Self {
        Self::new(items, VaccineHit::display_label)
    }
}

impl CatalogSource<HealthUnitHit> {
    /// Health units searched by name.
    pub fn health_units(items: Vec<HealthUnitHit>) -> Self {
        Self::new(items, |unit: &HealthUnitHit| unit.name.clone())
    }
}

#[async_trait]
impl<T> SearchSource<T> for CatalogSource<T>
where
    T: Clone + Send + Sync,
{
    async fn search(&self, query: &str) -> Result<Vec<T>, SourceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.matches(query))
    }
}

/// Lowercase and strip the diacritics used in Portuguese and Spanish names.
fn fold(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn vaccine(id: u32, name: &str, manufacturer: &str) -> VaccineHit {
        VaccineHit {
            id,
            name: name.to_string(),
            manufacturer_name: manufacturer.to_string(),
        }
    }

    fn names(hits: &[VaccineHit]) -> Vec<&str> {
        hits.iter().map(|hit| hit.name.as_str()).collect()
    }

    #[test]
    fn test_fold_strips_accents() {
        assert_eq!(fold("Vacinação São Tomé"), "vacinacao sao tome");
    }

    #[test]
    fn test_accent_insensitive_match() {
        let source = CatalogSource::health_units(vec![
            HealthUnitHit {
                id: Uuid::new_v4(),
                name: "UBS São João".to_string(),
            },
            HealthUnitHit {
                id: Uuid::new_v4(),
                name: "UBS Centro".to_string(),
            },
        ]);

        let hits = source.matches("sao jo");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "UBS São João");
    }

    #[test]
    fn test_prefix_matches_rank_first() {
        let source = CatalogSource::vaccines(vec![
            vaccine(3, "Dupla adulto", "Butantan"),
            vaccine(1, "CoronaVac", "Sinovac"),
            vaccine(7, "BCG", "Fundação Ataulpho de Paiva"),
        ]);

        assert_eq!(names(&source.matches("co")), vec!["CoronaVac"]);
        assert_eq!(names(&source.matches("vac")), vec!["CoronaVac"]);
        assert_eq!(names(&source.matches("a")), vec!["BCG", "CoronaVac", "Dupla adulto"]);
    }

    #[test]
    fn test_limit_caps_hits() {
        let items = (1..=25).map(|id| vaccine(id, &format!("Vacina {id:02}"), "")).collect();
        let source = CatalogSource::vaccines(items);

        let hits = source.matches("vacina");
        assert_eq!(hits.len(), DEFAULT_RESULT_LIMIT);
        assert_eq!(hits[0].name, "Vacina 01");

        let source = source.with_limit(3);
        assert_eq!(source.matches("vacina").len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_waits_for_latency() {
        let source = CatalogSource::vaccines(vec![vaccine(1, "CoronaVac", "Sinovac")])
            .with_latency(Duration::from_millis(250));

        let started = tokio::time::Instant::now();
        let hits = source.search("coro").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(250));
        assert_eq!(names(&hits), vec!["CoronaVac"]);
    }
}
