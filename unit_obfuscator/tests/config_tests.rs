use std::io::Write;
use tempfile::Builder;
use unit_obfuscator::config::{load_config, CliOverrides, ConfigError};
use unit_obfuscator::{AmountPolicy, Matching, OutputFormat};

#[test]
fn defaults_without_sources() {
    let cfg = load_config(None, &CliOverrides::default()).unwrap();
    assert_eq!(cfg.matching, Matching::Substring);
    assert_eq!(cfg.amounts, AmountPolicy::Propagate);
    assert_eq!(cfg.output, OutputFormat::Text);
}

#[test]
fn reads_config_file() {
    let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "matching = \"exact-term\"").unwrap();
    writeln!(file, "amounts = \"reject\"").unwrap();
    file.flush().unwrap();

    let cfg = load_config(file.path().to_str(), &CliOverrides::default()).unwrap();
    assert_eq!(cfg.matching, Matching::ExactTerm);
    assert_eq!(cfg.amounts, AmountPolicy::Reject);
    assert_eq!(cfg.output, OutputFormat::Text);
}

#[test]
fn cli_overrides_win_over_file() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"matching": "exact-term", "output": "json"}}"#).unwrap();
    file.flush().unwrap();

    let overrides = CliOverrides {
        matching: Some("substring".into()),
        ..Default::default()
    };
    let cfg = load_config(file.path().to_str(), &overrides).unwrap();
    assert_eq!(cfg.matching, Matching::Substring);
    assert_eq!(cfg.output, OutputFormat::Json);
}

#[test]
fn rejects_unknown_values() {
    let overrides = CliOverrides {
        amounts: Some("ignore".into()),
        ..Default::default()
    };
    assert!(matches!(
        load_config(None, &overrides),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn missing_config_file_is_an_error() {
    let result = load_config(Some("/nonexistent/unit_obfuscator.toml"), &CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::Config(_))));
}

#[test]
fn bundled_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/unit_obfuscator.toml");
    let bundled = load_config(Some(path), &CliOverrides::default()).unwrap();
    let defaults = load_config(None, &CliOverrides::default()).unwrap();
    assert_eq!(bundled, defaults);
}
