//! Tests for config module

#[cfg(test)]
mod tests {
    use crate::config::*;

    #[test]
    fn test_config_default_values() {
        // Arrange & Act
        let config = SdkConfig::default();

        // Assert
        assert!(config.validation.check_binary_vectors);
        assert!(!config.validation.strict_primary_key);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_config_from_toml_partial() {
        // Arrange
        let toml_str = r#"
            [validation]
            strict_primary_key = true
        "#;

        // Act
        let config = SdkConfig::from_toml(toml_str).expect("parse");

        // Assert
        assert!(config.validation.strict_primary_key);
        assert!(config.validation.check_binary_vectors);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_from_toml_wrong_type() {
        let toml_str = r#"
            [validation]
            check_binary_vectors = "sometimes"
        "#;

        let result = SdkConfig::from_toml(toml_str);

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_config_load_from_file() {
        // Arrange
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("milvus_sdk.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").expect("write");

        // Act
        let config = SdkConfig::load_from_path(&path).expect("load");

        // Assert
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");

        let config = SdkConfig::load_from_path(dir.path().join("absent.toml")).expect("load");

        assert_eq!(config.validation, ValidationConfig::default());
    }

    #[test]
    fn test_config_validate_success() {
        assert!(SdkConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validate_invalid_log_level() {
        let mut config = SdkConfig::default();
        config.logging.level = "verbose".to_string();

        let result = config.validate();

        match result {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, "logging.level"),
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_config_validate_invalid_log_format() {
        let mut config = SdkConfig::default();
        config.logging.format = "xml".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "logging.format"
        ));
    }

    #[test]
    fn test_config_reconciler_uses_validation_section() {
        let mut config = SdkConfig::default();
        config.validation.strict_primary_key = true;

        let reconciler = config.reconciler();

        assert!(reconciler.config().strict_primary_key);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = SdkConfig::default();
        config.validation.check_binary_vectors = false;
        config.logging.format = "json".to_string();

        let toml_str = config.to_toml().expect("serialize");
        let parsed = SdkConfig::from_toml(&toml_str).expect("parse");

        assert_eq!(parsed, config);
    }
}
