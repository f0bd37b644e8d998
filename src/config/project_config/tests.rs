use super::*;

#[test]
fn test_default_config() {
    let config = ProjectConfig::default();
    assert_eq!(config.format(), None);
    assert_eq!(config.flavor(), None);
    assert_eq!(config.threshold(), None);
    assert!(!config.no_emoji());
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_toml_defaults() {
    let config: ProjectConfig = toml::from_str(
        r#"
[defaults]
format = "summary"
threshold = 15.0
flavor = "shadow"
no_emoji = true
"#,
    )
    .unwrap();
    assert_eq!(config.format(), Some(OutputFormat::Summary));
    assert_eq!(config.flavor(), Some(ScoreFlavor::Shadow));
    assert_eq!(config.threshold(), Some(15.0));
    assert!(config.no_emoji());
}

#[test]
fn test_integer_threshold_in_toml() {
    let config: ProjectConfig = toml::from_str("[defaults]\nthreshold = 30\n").unwrap();
    assert_eq!(config.threshold(), Some(30.0));
}

#[test]
fn test_validate_rejects_bad_values() {
    let mut config = ProjectConfig::default();
    config.defaults.format = Some("sarif".into());
    assert!(config.validate().is_err());

    let mut config = ProjectConfig::default();
    config.defaults.flavor = Some("neon".into());
    assert!(config.validate().is_err());

    let mut config = ProjectConfig::default();
    config.defaults.threshold = Some(f64::NAN);
    assert!(config.validate().is_err());
}

#[test]
fn test_load_project_config_prefers_toml() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("gap-score.toml"),
        "[defaults]\nformat = \"summary\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join(".gap-score.json"),
        r#"{"defaults": {"format": "json"}}"#,
    )
    .unwrap();
    let config = load_project_config(dir.path());
    assert_eq!(config.format(), Some(OutputFormat::Summary));
}

#[test]
fn test_load_project_config_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".gap-score.json"),
        r#"{"defaults": {"threshold": 20}}"#,
    )
    .unwrap();
    assert_eq!(load_project_config(dir.path()).threshold(), Some(20.0));
}

#[test]
fn test_load_project_config_ignores_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("gap-score.toml"), "[defaults\nformat=").unwrap();
    assert_eq!(load_project_config(dir.path()), ProjectConfig::default());
}

#[test]
fn test_load_project_config_missing_dir_is_default() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(load_project_config(dir.path()), ProjectConfig::default());
}

#[test]
fn test_load_config_file_reports_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[defaults]\nformat = \"xml\"\n").unwrap();
    let err = load_config_file(&path).unwrap_err();
    assert!(matches!(err, GapScoreError::Config { .. }));
    assert!(err.to_string().contains("Unknown format"), "{err}");
}

#[test]
fn test_load_config_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_config_file(&dir.path().join("nope.toml")).is_err());
}
