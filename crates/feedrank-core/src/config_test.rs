use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.pipeline_config_path.is_none());
    assert!(!cfg.pretty_json);
    assert!(cfg.top_n_override.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("FEEDRANK_LOG_LEVEL", "debug");
    map.insert("FEEDRANK_PIPELINE_CONFIG", "./config/pipeline.yaml");
    map.insert("FEEDRANK_PRETTY_JSON", "true");
    map.insert("FEEDRANK_TOP_N", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(
        cfg.pipeline_config_path,
        Some(PathBuf::from("./config/pipeline.yaml"))
    );
    assert!(cfg.pretty_json);
    assert_eq!(cfg.top_n_override, Some(5));
}

#[test]
fn blank_pipeline_config_path_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("FEEDRANK_PIPELINE_CONFIG", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.pipeline_config_path.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_top_n() {
    let mut map = HashMap::new();
    map.insert("FEEDRANK_TOP_N", "ten");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FEEDRANK_TOP_N"),
        "expected InvalidEnvVar(FEEDRANK_TOP_N), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_pretty_flag() {
    let mut map = HashMap::new();
    map.insert("FEEDRANK_PRETTY_JSON", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FEEDRANK_PRETTY_JSON"),
        "expected InvalidEnvVar(FEEDRANK_PRETTY_JSON), got: {result:?}"
    );
}

#[test]
fn parse_bool_accepts_common_spellings() {
    assert!(parse_bool("X", "YES").unwrap());
    assert!(parse_bool("X", "1").unwrap());
    assert!(!parse_bool("X", "no").unwrap());
    assert!(!parse_bool("X", " False ").unwrap());
}
