use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

use crate::model::Unit;

/// Editor configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EditorConfig {
    /// Directory exported recipes are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Pretty-print exported JSON
    #[serde(default)]
    pub pretty: bool,
    /// Unit preselected in new ingredient rows
    #[serde(default)]
    pub default_unit: Unit,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            pretty: false,
            default_unit: Unit::default(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("recipes")
}

impl EditorConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_EDITOR__ prefix
    /// 2. recipe-editor.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_EDITOR__OUTPUT_DIR
    pub fn load() -> Result<Self, ConfigError> {
        load_config("recipe-editor")
    }
}

/// Load configuration from `<name>.toml` (optional) and the environment
pub fn load_config(name: &str) -> Result<EditorConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name(name).required(false))
        .add_source(
            Environment::with_prefix("RECIPE_EDITOR")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_values() {
        let config = EditorConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("recipes"));
        assert!(!config.pretty);
        assert_eq!(config.default_unit, Unit::Cups);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.toml");
        fs::write(
            &path,
            "output_dir = \"/tmp/my-recipes\"\npretty = true\ndefault_unit = \"Teaspoons\"\n",
        )
        .unwrap();

        let base = path.with_extension("");
        let config = load_config(base.to_str().unwrap()).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/my-recipes"));
        assert!(config.pretty);
        assert_eq!(config.default_unit, Unit::Teaspoons);
    }

    #[test]
    fn test_load_config_without_file() {
        let config = load_config("definitely-missing-recipe-editor-config").unwrap();
        // Environment overrides may be present, but loading must not fail
        assert!(!config.output_dir.as_os_str().is_empty());
    }
}
