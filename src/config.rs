//! Settings loaded from `marketmaestro.toml`.
//!
//! The struct [`MaestroConfig`] holds every tunable delay and limit.
//! Fields missing from the file use the defaults below. The environment
//! variable `MARKETMAESTRO_CONFIG` points at an alternative file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::error::MaestroError;
use crate::upload::{CompletionTiming, MAX_FILES};

pub const CONFIG_FILE: &str = "marketmaestro.toml";
pub const CONFIG_ENV: &str = "MARKETMAESTRO_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct MaestroConfig {
    /// Maximum number of files a session may hold.
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Delay before the first file of a batch completes.
    #[serde(default = "default_completion_base_ms")]
    pub completion_base_ms: u64,

    /// Extra delay per following file in a batch.
    #[serde(default = "default_completion_stagger_ms")]
    pub completion_stagger_ms: u64,

    /// Duration of the simulated summarization.
    #[serde(default = "default_summarize_delay_ms")]
    pub summarize_delay_ms: u64,

    /// Delay before the assistant answers a chat query.
    #[serde(default = "default_chat_reply_delay_ms")]
    pub chat_reply_delay_ms: u64,

    /// Optional TOML file replacing the built-in sample catalog.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_max_files() -> usize {
    MAX_FILES
}

fn default_completion_base_ms() -> u64 {
    1000
}

fn default_completion_stagger_ms() -> u64 {
    500
}

fn default_summarize_delay_ms() -> u64 {
    2000
}

fn default_chat_reply_delay_ms() -> u64 {
    1000
}

impl Default for MaestroConfig {
    fn default() -> Self {
        Self {
            max_files: default_max_files(),
            completion_base_ms: default_completion_base_ms(),
            completion_stagger_ms: default_completion_stagger_ms(),
            summarize_delay_ms: default_summarize_delay_ms(),
            chat_reply_delay_ms: default_chat_reply_delay_ms(),
            catalog_path: None,
        }
    }
}

impl MaestroConfig {
    /// Load from an explicit path, `$MARKETMAESTRO_CONFIG`, or
    /// `marketmaestro.toml` in the working directory, in that order.
    /// A missing default file means defaults; a missing explicit file is an
    /// error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let from_env = std::env::var(CONFIG_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str::<MaestroConfig>(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.max_files == 0 {
            return Err(MaestroError::Config("max_files must be at least 1".into()).into());
        }
        Ok(())
    }

    pub fn completion_timing(&self) -> CompletionTiming {
        CompletionTiming {
            base_ms: self.completion_base_ms,
            stagger_ms: self.completion_stagger_ms,
        }
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("failed to load catalog {}", path.display())),
            None => Ok(Catalog::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let config = MaestroConfig::default();
        assert_eq!(config.max_files, 5);
        assert_eq!(config.completion_base_ms, 1000);
        assert_eq!(config.completion_stagger_ms, 500);
        assert_eq!(config.summarize_delay_ms, 2000);
        assert_eq!(config.chat_reply_delay_ms, 1000);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            max_files = 3
            summarize_delay_ms = 10
        "#;
        let config: MaestroConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.max_files, 3);
        assert_eq!(config.summarize_delay_ms, 10);
        assert_eq!(config.completion_base_ms, 1000);
        assert_eq!(config.completion_timing().stagger_ms, 500);
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "completion_stagger_ms = 250").unwrap();
        let config = MaestroConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.completion_stagger_ms, 250);
        assert_eq!(config.completion_timing().delay_for_index(2), 1500);
    }

    #[test]
    fn zero_cap_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_files = 0").unwrap();
        assert!(MaestroConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(MaestroConfig::load(Some(Path::new("/no/such/marketmaestro.toml"))).is_err());
    }

    #[test]
    fn catalog_defaults_to_builtin() {
        let catalog = MaestroConfig::default().catalog().unwrap();
        assert_eq!(catalog.sample_files.len(), 5);
    }
}
