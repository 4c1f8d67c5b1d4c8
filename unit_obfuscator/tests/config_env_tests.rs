// Kept in its own test binary: it mutates the process environment.
use unit_obfuscator::config::{load_config, CliOverrides};
use unit_obfuscator::{Matching, OutputFormat};

#[test]
fn environment_overrides_defaults_but_not_cli() {
    std::env::set_var("UNIT_OBFUSCATOR_MATCHING", "exact-term");
    std::env::set_var("UNIT_OBFUSCATOR_OUTPUT", "json");

    let cfg = load_config(None, &CliOverrides::default()).unwrap();
    assert_eq!(cfg.matching, Matching::ExactTerm);
    assert_eq!(cfg.output, OutputFormat::Json);

    let overrides = CliOverrides {
        output: Some("text".into()),
        ..Default::default()
    };
    let cfg = load_config(None, &overrides).unwrap();
    assert_eq!(cfg.output, OutputFormat::Text);

    std::env::remove_var("UNIT_OBFUSCATOR_MATCHING");
    std::env::remove_var("UNIT_OBFUSCATOR_OUTPUT");
}
