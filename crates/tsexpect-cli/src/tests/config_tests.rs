use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_config_accepts_bool_strings() {
    let config = parse_config(r#"{ "format": "json", "color": "off", "failFast": "yes" }"#).unwrap();
    assert_eq!(config.format, Some(OutputFormat::Json));
    assert_eq!(config.color, Some(false));
    assert_eq!(config.fail_fast, Some(true));

    let config = parse_config(r#"{ "failFast": true }"#).unwrap();
    assert_eq!(config.fail_fast, Some(true));
    assert_eq!(config.color, None);
    assert_eq!(config.format, None);
}

#[test]
fn test_parse_config_rejects_bad_values() {
    let err = parse_config(r#"{ "color": "sometimes" }"#).unwrap_err();
    assert!(format!("{err:#}").contains("invalid boolean value: 'sometimes'"));
    assert!(parse_config(r#"{ "format": "xml" }"#).is_err());
    assert!(parse_config(r#"{ "colour": true }"#).is_err());
}

#[test]
fn test_find_config_beside_fixture() {
    let dir = TempDir::new().unwrap();
    let fixture = dir.path().join("types.json");
    assert_eq!(find_config(None, &fixture), None);

    let config_path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&config_path, "{}").unwrap();
    assert_eq!(find_config(None, &fixture), Some(config_path));

    let explicit = dir.path().join("other.json");
    assert_eq!(find_config(Some(explicit.as_path()), &fixture), Some(explicit.clone()));
}

#[test]
fn test_load_config_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));

    std::fs::write(&path, r#"{ "format": "text", "color": 1 }"#).unwrap();
    assert!(load_config(&path).is_err());

    std::fs::write(&path, r#"{ "format": "text", "color": "1" }"#).unwrap();
    let config = load_config(&path).unwrap();
    assert_eq!(config.color, Some(true));
}

#[test]
fn test_resolve_options_precedence() {
    let config = TsExpectConfig {
        format: Some(OutputFormat::Json),
        color: Some(true),
        fail_fast: Some(true),
    };
    let options = resolve_options(&config, None, false, false, true);
    assert_eq!(
        options,
        ResolvedOptions {
            format: OutputFormat::Json,
            color: false,
            fail_fast: true,
        }
    );

    let options = resolve_options(&config, Some(OutputFormat::Text), false, false, true);
    assert!(options.color);
    assert_eq!(options.format, OutputFormat::Text);

    let options = resolve_options(&config, Some(OutputFormat::Text), true, false, true);
    assert!(!options.color);

    let defaults = resolve_options(&TsExpectConfig::default(), None, false, false, false);
    assert_eq!(
        defaults,
        ResolvedOptions {
            format: OutputFormat::Text,
            color: false,
            fail_fast: false,
        }
    );
    assert!(resolve_options(&TsExpectConfig::default(), None, false, true, false).fail_fast);
}
