//! Tests for the ratesplit configuration system.

use ratesplit_core::config::{
    ClusterConfig, ConfigOverrides, FeatureSet, RatesplitConfig, ReportFormat,
};
use ratesplit_core::errors::ConfigError;

#[test]
fn test_defaults_favor_stability() {
    let config = RatesplitConfig::load(None, None).unwrap();
    assert_eq!(config.cluster.effective_restarts(), 100);
    assert_eq!(config.cluster.effective_max_iterations(), 300);
    assert_eq!(config.cluster.effective_parallelism(), 1);
    assert!((config.cluster.effective_tolerance() - 1e-4).abs() < 1e-12);
    assert_eq!(config.cluster.seed, None);
    assert_eq!(config.report.effective_format(), ReportFormat::Phyml);
    assert_eq!(config.report.effective_feature_set(), FeatureSet::Auto);
}

#[test]
fn test_file_then_overrides() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("ratesplit.toml");
    std::fs::write(
        &path,
        r#"
[cluster]
restarts = 250
seed = 7

[report]
format = "raxml"
"#,
    )
    .unwrap();

    let overrides = ConfigOverrides {
        seed: Some(42),
        feature_set: Some(FeatureSet::SiteLikelihood),
        ..Default::default()
    };
    let config = RatesplitConfig::load(Some(&path), Some(&overrides)).unwrap();

    // File beats defaults.
    assert_eq!(config.cluster.effective_restarts(), 250);
    assert_eq!(config.report.effective_format(), ReportFormat::Raxml);
    // Overrides beat the file.
    assert_eq!(config.cluster.seed, Some(42));
    assert_eq!(config.report.effective_feature_set(), FeatureSet::SiteLikelihood);
}

#[test]
fn test_tolerance_override() {
    let overrides = ConfigOverrides {
        tolerance: Some(1e-6),
        ..Default::default()
    };
    let config = RatesplitConfig::load(None, Some(&overrides)).unwrap();
    assert_eq!(config.cluster.tolerance, Some(1e-6));

    let bad = ConfigOverrides {
        tolerance: Some(f64::NAN),
        ..Default::default()
    };
    let result = RatesplitConfig::load(None, Some(&bad));
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let result = RatesplitConfig::load(Some(&dir.path().join("absent.toml")), None);
    assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
}

#[test]
fn test_invalid_toml_syntax() {
    let result = RatesplitConfig::from_toml("this is not valid toml {{{{");
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn test_zero_restarts_rejected() {
    let config = RatesplitConfig::from_toml("[cluster]\nrestarts = 0\n").unwrap();
    match RatesplitConfig::validate(&config) {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "cluster.restarts");
        }
        other => panic!("Expected ValidationFailed, got: {:?}", other),
    }
}

#[test]
fn test_negative_tolerance_rejected() {
    let config = RatesplitConfig::from_toml("[cluster]\ntolerance = -1.0\n").unwrap();
    assert!(RatesplitConfig::validate(&config).is_err());
}

#[test]
fn test_zero_parallelism_override_rejected() {
    let overrides = ConfigOverrides {
        parallelism: Some(0),
        ..Default::default()
    };
    assert!(RatesplitConfig::load(None, Some(&overrides)).is_err());
}

#[test]
fn test_unknown_keys_ignored() {
    let config = RatesplitConfig::from_toml(
        r#"
[cluster]
restarts = 10
future_option = true
"#,
    )
    .unwrap();
    assert_eq!(config.cluster.restarts, Some(10));
}

#[test]
fn test_toml_roundtrip_preserves_values() {
    let config = RatesplitConfig {
        cluster: ClusterConfig::default().with_seed(99),
        ..Default::default()
    };
    let text = config.to_toml().unwrap();
    let back = RatesplitConfig::from_toml(&text).unwrap();
    assert_eq!(back, config);
}
