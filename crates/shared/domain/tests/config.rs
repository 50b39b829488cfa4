use serde_json::json;
use trek_domain::config::{ApiConfig, ClientConfig, DatabaseConfig, ServerConfig};
use trek_domain::preferences::Preferences;

#[test]
fn defaults_match_documented_values() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4583);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "trek");
    assert_eq!(db.database, "catalog");
    assert!(db.credentials.is_none());

    let client = ClientConfig::default();
    assert_eq!(client.api_url, "http://127.0.0.1:4583");
    assert_eq!(client.preferences, std::path::PathBuf::from("trek-preferences.json"));
}

#[test]
fn partial_api_config_fills_defaults() {
    let raw = json!({
        "server": { "port": 8080 },
        "catalog": { "seed": "data/destinations.json" }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.namespace, "trek");
    assert_eq!(cfg.catalog.seed.as_deref(), Some(std::path::Path::new("data/destinations.json")));
    assert_eq!(cfg.log.level, "info");
}

#[test]
fn api_config_clones_share_until_mutated() {
    let original = ApiConfig::default();
    let mut copy = original.clone();
    copy.server.port = 9000;

    assert_eq!(original.server.port, 4583);
    assert_eq!(copy.server.port, 9000);
}

#[test]
fn preferences_use_camel_case_and_default_missing_fields() {
    let prefs: Preferences = serde_json::from_value(json!({})).unwrap();
    assert!(!prefs.dark_mode);

    let dark = prefs.toggled();
    assert_eq!(serde_json::to_value(dark).unwrap(), json!({ "darkMode": true }));
    assert_eq!(dark.theme_class(), "theme-dark");
    assert_eq!(dark.toggled(), prefs);
}
