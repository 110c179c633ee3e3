//! Configuration module
//!
//! Handles loading and parsing of jrepresenter.toml. Every key is optional.

pub mod model;

use std::path::Path;

pub use self::model::*;

impl JrepresenterConfig {
    /// Load configuration from a file path
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() -> anyhow::Result<()> {
        let config = JrepresenterConfig::from_toml_str("")?;
        assert_eq!(config, JrepresenterConfig::default());
        assert_eq!(config.generator.package_prefix, "gen");
        assert_eq!(config.generator.mapper_suffix, "Mapper");
        assert_eq!(config.java.indent, 2);
        assert!(config.java.file_comment);
        Ok(())
    }

    #[test]
    fn test_load_toml() -> anyhow::Result<()> {
        let toml_content = r#"
[generator]
package_prefix = "generated"
mapper_suffix = "Converter"

[java]
indent = 4
javadoc = false
"#;
        let dir = tempfile::tempdir()?;
        let file_path = dir.path().join("jrepresenter.toml");
        std::fs::write(&file_path, toml_content)?;

        let config = JrepresenterConfig::load(&file_path)?;
        assert_eq!(config.generator.package_prefix, "generated");
        assert_eq!(config.generator.mapper_suffix, "Converter");
        assert_eq!(config.generator.representer_suffix, "Representer");
        assert_eq!(config.java.indent, 4);
        assert!(!config.java.javadoc);
        assert!(config.java.file_comment);
        Ok(())
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = JrepresenterConfig::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_invalid_toml_fails() {
        let result = JrepresenterConfig::from_toml_str("[generator\npackage_prefix = 1");
        assert!(matches!(result, Err(crate::Error::Toml(_))));
    }
}
