//! Configuration with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/movietree/movietree.toml`
//! 3. Environment variables: `MOVIETREE_*` prefix

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory relative output paths are resolved against
    pub output_dir: PathBuf,
    /// Leading header rows to skip when loading a catalog
    pub skip_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            skip_rows: 1,
        }
    }
}

impl Settings {
    /// Path of the global config file, if a home directory can be determined.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "movietree").map(|dirs| dirs.config_dir().join("movietree.toml"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("output_dir", "output")?
            .set_default("skip_rows", 1i64)?;

        if let Some(path) = Self::config_path() {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix("MOVIETREE"))
            .build()?
            .try_deserialize()
    }

    /// Resolves an export path: relative paths land in `output_dir`.
    pub fn resolve_output(&self, path: &std::path::Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.output_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output_dir, PathBuf::from("output"));
        assert_eq!(settings.skip_rows, 1);
    }

    #[test]
    fn test_resolve_output_relative() {
        let settings = Settings::default();
        assert_eq!(
            settings.resolve_output(std::path::Path::new("sample1.csv")),
            PathBuf::from("output/sample1.csv")
        );
    }

    #[test]
    fn test_resolve_output_absolute() {
        let settings = Settings::default();
        assert_eq!(
            settings.resolve_output(std::path::Path::new("/tmp/out.csv")),
            PathBuf::from("/tmp/out.csv")
        );
    }
}
