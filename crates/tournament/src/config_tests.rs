use super::*;
use std::io::Write;

#[test]
fn test_defaults_match_legacy_session() {
    let config = TournamentConfig::default();
    assert_eq!(config.command, vec!["java", "Tournament"]);
    assert_eq!(config.rounds, 10_000);
    assert_eq!(config.tournaments, 50);
    assert_eq!(config.results_path, PathBuf::from("tourny_results.txt"));
    assert!(config.timeout().is_none());
    assert!(config.progress);
    assert!(!config.strict);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let text = r#"
        rounds = 500
        timeout_secs = 30
        strict = true
    "#;
    let config = TournamentConfig::from_toml(text, Path::new("inline.toml")).unwrap();

    assert_eq!(config.rounds, 500);
    assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    assert!(config.strict);
    // Untouched keys
    assert_eq!(config.command, vec!["java", "Tournament"]);
    assert_eq!(config.tournaments, 50);
}

#[test]
fn test_custom_command() {
    let text = r#"command = ["java", "-cp", "bots", "Tournament"]"#;
    let config = TournamentConfig::from_toml(text, Path::new("inline.toml")).unwrap();
    assert_eq!(config.command.len(), 4);
    assert_eq!(config.command[2], "bots");
}

#[test]
fn test_empty_command_rejected() {
    let err = TournamentConfig::from_toml("command = []", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, TournamentError::Config { .. }));
    assert!(err.to_string().contains("bad.toml"));
}

#[test]
fn test_zero_timeout_rejected() {
    let err = TournamentConfig::from_toml("timeout_secs = 0", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, TournamentError::Config { .. }));
}

#[test]
fn test_invalid_toml_rejected() {
    let err = TournamentConfig::from_toml("rounds = \"many\"", Path::new("bad.toml")).unwrap_err();
    assert!(matches!(err, TournamentError::Config { .. }));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "results_path = \"out/results.txt\"").unwrap();
    writeln!(file, "progress = false").unwrap();

    let config = TournamentConfig::load_or_default(Some(file.path())).unwrap();
    assert_eq!(config.results_path, PathBuf::from("out/results.txt"));
    assert!(!config.progress);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = TournamentConfig::load(&missing).unwrap_err();
    assert!(matches!(err, TournamentError::Io { .. }));
}

#[test]
fn test_overrides_replace_config_values() {
    let mut config = TournamentConfig::default();
    let overrides = ConfigOverrides {
        results_path: Some(PathBuf::from("runs/out.txt")),
        rounds: Some(1000),
        timeout_secs: Some(90),
        strict: true,
        quiet: true,
    };
    config.apply_overrides(&overrides).unwrap();

    assert_eq!(config.results_path, PathBuf::from("runs/out.txt"));
    assert_eq!(config.rounds, 1000);
    assert_eq!(config.timeout(), Some(Duration::from_secs(90)));
    assert!(config.strict);
    assert!(!config.progress);
}

#[test]
fn test_empty_overrides_keep_config() {
    let text = "strict = true\nrounds = 300\n";
    let mut config = TournamentConfig::from_toml(text, Path::new("inline.toml")).unwrap();
    let before = config.clone();
    config.apply_overrides(&ConfigOverrides::default()).unwrap();
    assert_eq!(config, before);
}

#[test]
fn test_zero_timeout_override_rejected() {
    let mut config = TournamentConfig::default();
    let overrides = ConfigOverrides {
        timeout_secs: Some(0),
        ..Default::default()
    };
    let err = config.apply_overrides(&overrides).unwrap_err();
    assert!(matches!(err, TournamentError::InvalidInput(_)));
    assert!(config.timeout().is_none());
}
