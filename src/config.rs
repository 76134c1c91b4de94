use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::coverage::DEFAULT_THRESHOLD;

pub const CONFIG_FILE: &str = "covpkg.toml";
pub const DEFAULT_INPUT: &str = "coverage.out";
pub const DEFAULT_PACKAGE_PREFIX: &str = "github.com/junbin-yang/go-kitbox/pkg";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Coverage profile to read
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Import path under which every direct child directory is a package
    #[serde(default = "default_package_prefix")]
    pub package_prefix: String,
    /// Minimum percentage for a package to count as "Good"
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_input() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT)
}

fn default_package_prefix() -> String {
    DEFAULT_PACKAGE_PREFIX.to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            package_prefix: default_package_prefix(),
            threshold: default_threshold(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.package_prefix.trim_end_matches('/').is_empty() {
            anyhow::bail!("package_prefix must not be empty");
        }

        if !(0.0..=100.0).contains(&self.threshold) {
            anyhow::bail!(
                "threshold must be between 0 and 100, got {}",
                self.threshold
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
input = "build/cover.out"
package_prefix = "example.com/app/internal"
threshold = 80.0
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input, PathBuf::from("build/cover.out"));
        assert_eq!(config.package_prefix, "example.com/app/internal");
        assert_eq!(config.threshold, 80.0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("threshold = 60.0").unwrap();

        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.package_prefix, DEFAULT_PACKAGE_PREFIX);
        assert_eq!(config.threshold, 60.0);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("treshold = 60.0").is_err());
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.threshold = 120.0;
        assert!(config.validate().is_err());

        config.threshold = 75.0;
        config.package_prefix = "/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.threshold, DEFAULT_THRESHOLD);

        fs::write(&path, "threshold = 90.0\n").unwrap();
        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.threshold, 90.0);

        fs::write(&path, "threshold = \"high\"\n").unwrap();
        assert!(Config::load_or_default(&path).is_err());
    }
}
