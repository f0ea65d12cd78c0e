use vx_protocol::*;

#[test]
fn test_vaccine_hit_uses_api_field_names() {
    let json = r#"{"id": 1, "nome": "CoronaVac", "fabricante_nome": "Sinovac"}"#;

    let hit: VaccineHit = serde_json::from_str(json).expect("Failed to deserialize VaccineHit");

    assert_eq!(hit.id, 1);
    assert_eq!(hit.name, "CoronaVac");
    assert_eq!(hit.manufacturer_name, "Sinovac");
    assert_eq!(hit.display_label(), "CoronaVac (Sinovac)");

    let value = serde_json::to_value(&hit).expect("Failed to serialize VaccineHit");
    assert_eq!(value["nome"], "CoronaVac");
    assert_eq!(value["fabricante_nome"], "Sinovac");
}

#[test]
fn test_vaccine_hit_without_manufacturer() {
    let hit: VaccineHit =
        serde_json::from_str(r#"{"id": 7, "nome": "BCG"}"#).expect("Failed to deserialize VaccineHit");

    assert_eq!(hit.manufacturer_name, "");
    assert_eq!(hit.display_label(), "BCG");
}

#[test]
fn test_catalog_deserialization_from_yaml() {
    let yaml_str = r#"
vaccines:
  - id: 1
    nome: CoronaVac
    fabricante_nome: Sinovac
  - id: 2
    nome: Comirnaty
    fabricante_nome: Pfizer
health_units:
  - id: 5b1f0c9e-2f57-4a53-9a43-2f0d2a1d9c11
    nome_unidade: UBS Centro
"#;

    let catalog: Catalog = serde_yaml::from_str(yaml_str).expect("Failed to deserialize Catalog");

    assert_eq!(catalog.vaccines.len(), 2);
    assert_eq!(catalog.health_units.len(), 1);
    assert_eq!(catalog.health_units[0].name, "UBS Centro");
    assert!(!catalog.is_empty());
}

#[test]
fn test_catalog_sections_are_optional() {
    let catalog: Catalog =
        serde_yaml::from_str("vaccines: []\n").expect("Failed to deserialize Catalog");
    assert!(catalog.is_empty());
}

#[test]
fn test_catalog_merge() {
    let mut first: Catalog = serde_json::from_str(
        r#"{"vaccines": [{"id": 1, "nome": "CoronaVac", "fabricante_nome": "Sinovac"}]}"#,
    )
    .expect("Failed to deserialize Catalog");
    let second: Catalog = serde_json::from_str(
        r#"{"vaccines": [{"id": 3, "nome": "BCG", "fabricante_nome": "FAP"}]}"#,
    )
    .expect("Failed to deserialize Catalog");

    first.merge(second);

    let names: Vec<&str> = first.vaccines.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["CoronaVac", "BCG"]);
}

#[test]
fn test_search_settings_from_toml_with_defaults() {
    let settings: SearchSettings =
        toml::from_str("debounce_ms = 250").expect("Failed to parse SearchSettings");

    assert_eq!(settings.debounce_ms, 250);
    assert_eq!(settings.min_query_length, DEFAULT_MIN_QUERY_LENGTH);
    assert_eq!(settings.fetch_timeout_ms, DEFAULT_FETCH_TIMEOUT_MS);
}

#[test]
fn test_selection_mode_serialization() {
    let json = serde_json::to_value(SelectionMode::Tag).expect("Failed to serialize SelectionMode");
    assert_eq!(json, "tag");

    let mode: SelectionMode =
        serde_json::from_str("\"persist\"").expect("Failed to deserialize SelectionMode");
    assert_eq!(mode, SelectionMode::Persist);
}

#[test]
fn test_campaign_draft_json() {
    let mut draft = CampaignDraft::default();
    draft.add_vaccine(VaccineHit {
        id: 1,
        name: "CoronaVac".to_string(),
        manufacturer_name: "Sinovac".to_string(),
    });

    let json = draft.to_pretty_json().expect("Failed to serialize CampaignDraft");
    let back: CampaignDraft = serde_json::from_str(&json).expect("Failed to deserialize CampaignDraft");

    assert_eq!(back, draft);
    assert!(json.contains("\"nome\": \"CoronaVac\""));
}

#[test]
fn test_global_config_from_toml() {
    let config: GlobalConfig = toml::from_str(
        r#"
[search]
min_query_length = 2

[source]
latency_ms = 0
"#,
    )
    .expect("Failed to parse GlobalConfig");

    assert_eq!(config.search.min_query_length, 2);
    assert_eq!(config.search.debounce_ms, DEFAULT_DEBOUNCE_MS);
    assert_eq!(config.source.latency_ms, 0);
}

#[test]
fn test_global_config_empty_toml_uses_defaults() {
    let config: GlobalConfig = toml::from_str("").expect("Failed to parse GlobalConfig");

    assert_eq!(config, GlobalConfig::default());
    assert_eq!(config.source.latency_ms, DEFAULT_SOURCE_LATENCY_MS);
}
