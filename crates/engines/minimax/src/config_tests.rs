use super::*;

#[test]
fn empty_toml_gives_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.name, "Minimax");
    assert_eq!(config.depth, 3);
    assert_eq!(config.quiescence_depth, 10);
    assert!(!config.persistent_table);
    assert_eq!(config.repetition_count, 2);
    assert_eq!(config.move_time_ms, None);
}

#[test]
fn partial_toml_overrides_fields() {
    let config = EngineConfig::from_toml_str(
        r#"
        name = "Deep"
        depth = 5
        persistent_table = true
        move_time_ms = 250
        "#,
    )
    .unwrap();
    assert_eq!(config.name, "Deep");
    assert_eq!(config.depth, 5);
    assert!(config.persistent_table);
    assert_eq!(config.move_time_ms, Some(250));
    assert_eq!(config.quiescence_depth, 10);
}

#[test]
fn unknown_field_is_rejected() {
    let err = EngineConfig::from_toml_str("dpeth = 4").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err}");
}

#[test]
fn zero_depth_is_rejected() {
    let err = EngineConfig::from_toml_str("depth = 0").unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { name: "depth", .. }), "{err}");
}

#[test]
fn toml_text_reloads_to_the_same_config() {
    let mut config = EngineConfig::default();
    config.depth = 6;
    config.move_time_ms = Some(1500);
    let text = config.to_toml_string().unwrap();
    assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn load_reports_missing_file() {
    let err = EngineConfig::load("/definitely/not/here/engine.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)), "{err}");
}

#[test]
fn set_option_is_case_insensitive() {
    let mut config = EngineConfig::default();
    config.set_option("Depth", "4").unwrap();
    config.set_option("QUIESCENCEDEPTH", "6").unwrap();
    config.set_option("persistenthash", "true").unwrap();
    config.set_option("RepetitionCount", "3").unwrap();
    assert_eq!(config.depth, 4);
    assert_eq!(config.quiescence_depth, 6);
    assert!(config.persistent_table);
    assert_eq!(config.repetition_count, 3);
    assert_eq!(config.replacement(), Replacement::DepthPreferred);
}

#[test]
fn move_time_zero_clears_the_budget() {
    let mut config = EngineConfig::default();
    config.set_option("MoveTime", "200").unwrap();
    assert_eq!(config.move_time_ms, Some(200));
    assert_eq!(config.limits().move_time, Some(Duration::from_millis(200)));
    config.set_option("MoveTime", "0").unwrap();
    assert_eq!(config.move_time_ms, None);
    assert_eq!(config.limits().move_time, None);
}

#[test]
fn bad_option_leaves_config_unchanged() {
    let mut config = EngineConfig::default();
    assert!(matches!(
        config.set_option("Depth", "deep"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
        config.set_option("RepetitionCount", "1"),
        Err(ConfigError::OutOfRange { .. })
    ));
    assert!(matches!(
        config.set_option("Hash", "64"),
        Err(ConfigError::UnknownOption(_))
    ));
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn settings_and_limits_follow_config() {
    let mut config = EngineConfig::default();
    config.quiescence_depth = 4;
    config.repetition_count = 3;
    config.depth = 7;
    assert_eq!(
        config.search_settings(),
        SearchSettings {
            quiescence_depth: 4,
            repetition_count: 3
        }
    );
    assert_eq!(config.limits().depth, 7);
    assert_eq!(config.replacement(), Replacement::Always);
}
