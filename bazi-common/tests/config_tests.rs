//! Tests for scoring configuration loading
//!
//! Covers:
//! - Defaults when tables are omitted
//! - Partial overrides of one profile
//! - Rejection of profiles that do not sum to 1.0
//! - Rejection of unknown strategy names and malformed TOML

use bazi_common::config::{CLIMATE, MEDIATION, SUPPORT_SUPPRESS};
use bazi_common::{Error, ScoringConfig};

#[test]
fn test_empty_document_uses_defaults() {
    let config = ScoringConfig::from_toml_str("").unwrap();
    assert_eq!(config, ScoringConfig::default());
}

#[test]
fn test_override_standard_profile_only() {
    let text = r#"
[standard]
support_suppress = 0.6
climate = 0.2
mediation = 0.2
"#;
    let config = ScoringConfig::from_toml_str(text).unwrap();

    assert_eq!(config.standard.weight(SUPPORT_SUPPRESS), Some(0.6));
    assert_eq!(config.standard.weight(CLIMATE), Some(0.2));
    // Extreme falls back to defaults
    assert_eq!(config.extreme, ScoringConfig::default().extreme);
}

#[test]
fn test_weights_not_summing_to_one_rejected() {
    let text = r#"
[extreme]
support_suppress = 0.5
climate = 0.5
mediation = 0.2
"#;
    let err = ScoringConfig::from_toml_str(text).unwrap_err();
    match err {
        Error::Config(msg) => assert!(msg.contains("extreme"), "message: {}", msg),
        other => panic!("expected Config error, got {:?}", other),
    }
}

#[test]
fn test_unknown_strategy_rejected() {
    let text = r#"
[standard]
support_suppress = 0.5
climate = 0.3
mediation = 0.1
astrology = 0.1
"#;
    assert!(matches!(
        ScoringConfig::from_toml_str(text),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_malformed_toml_rejected() {
    assert!(matches!(
        ScoringConfig::from_toml_str("[standard\nclimate = "),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = ScoringConfig::default();
    let text = toml::to_string(&config).unwrap();
    assert!(text.contains(MEDIATION));
    let parsed = ScoringConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, config);
}
