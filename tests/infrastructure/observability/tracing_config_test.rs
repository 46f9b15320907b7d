use config::Map;
use hovor::infrastructure::observability::TracingConfig;
use hovor::presentation::config::{Environment, Settings};

#[test]
fn given_default_config_when_created_then_targets_local_with_crate_filter() {
    let config = TracingConfig::default();
    assert_eq!(config.environment, Environment::Local);
    assert!(config.default_filter.contains("hovor=debug"));
}

#[test]
fn given_settings_when_building_config_then_json_flag_follows_logging_section() {
    let mut settings = Settings::load_from(Environment::Test, Map::new()).unwrap();
    settings.logging.json = true;

    let config = TracingConfig::from_settings(Environment::Prod, &settings);

    assert!(config.json_format);
    assert_eq!(config.environment, Environment::Prod);
}

#[test]
fn given_log_format_json_when_building_config_from_settings_then_json_is_enabled() {
    let vars: Map<String, String> = [("LOG_FORMAT".to_string(), "JSON".to_string())]
        .into_iter()
        .collect();
    let settings = Settings::load_from(Environment::Test, vars).unwrap();

    let config = TracingConfig::from_settings(Environment::Test, &settings);

    assert!(config.json_format);
}

#[test]
fn given_other_log_format_when_building_config_from_settings_then_plain_output_is_kept() {
    let vars: Map<String, String> = [("LOG_FORMAT".to_string(), "pretty".to_string())]
        .into_iter()
        .collect();
    let settings = Settings::load_from(Environment::Test, vars).unwrap();

    let config = TracingConfig::from_settings(Environment::Test, &settings);

    assert!(!config.json_format);
}
