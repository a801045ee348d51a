use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::data::filter::FilterSelection;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "titanic-explorer.json";

/// Overrides `dataset_path` when set.
pub const DATASET_ENV: &str = "TITANIC_EXPLORER_DATASET";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

/// Startup settings. Every field has a default, so an absent or partial
/// config file is fine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Passenger table read once at startup.
    pub dataset_path: PathBuf,
    /// Number of bars in the age histogram.
    pub histogram_bins: usize,
    /// Initial gender selection, as the filter control would emit it.
    pub default_sexes: Vec<String>,
    /// Initial class selection ("1", "2", "3").
    pub default_classes: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("titanic_dataset.csv"),
            histogram_bins: 30,
            default_sexes: vec!["male".to_owned(), "female".to_owned()],
            default_classes: vec!["1".to_owned(), "2".to_owned(), "3".to_owned()],
        }
    }
}

impl AppConfig {
    /// Read [`CONFIG_FILE`] from the working directory if present, then apply
    /// the environment override.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file_or_default(Path::new(CONFIG_FILE))?;
        if let Some(path) = std::env::var_os(DATASET_ENV) {
            config.dataset_path = PathBuf::from(path);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_file_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            bail!("histogram_bins must be at least 1");
        }
        self.initial_selection()?;
        Ok(())
    }

    /// The configured default selection, converted at the input boundary.
    pub fn initial_selection(&self) -> Result<FilterSelection> {
        FilterSelection::parse(&self.default_sexes, &self.default_classes)
            .context("invalid default selection in config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Pclass, Sex};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("titanic-explorer-cfg-{}-{name}", std::process::id()))
    }

    #[test]
    fn defaults_select_everything() -> Result<()> {
        let config = AppConfig::default();
        config.validate()?;
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.initial_selection()?, FilterSelection::all());
        Ok(())
    }

    #[test]
    fn missing_file_falls_back_to_defaults() -> Result<()> {
        let config = AppConfig::from_file_or_default(&temp_path("absent.json"))?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> Result<()> {
        let path = temp_path("partial.json");
        std::fs::write(
            &path,
            r#"{ "dataset_path": "data/passengers.parquet", "default_classes": ["1"] }"#,
        )?;
        let config = AppConfig::from_file_or_default(&path)?;
        std::fs::remove_file(&path)?;

        assert_eq!(config.dataset_path, PathBuf::from("data/passengers.parquet"));
        assert_eq!(config.histogram_bins, 30);
        let selection = config.initial_selection()?;
        assert_eq!(selection.classes.iter().copied().collect::<Vec<_>>(), vec![Pclass::First]);
        assert!(selection.sexes.contains(&Sex::Female));
        Ok(())
    }

    #[test]
    fn rejects_invalid_values() {
        let bad_class = AppConfig {
            default_classes: vec!["4".to_owned()],
            ..AppConfig::default()
        };
        assert!(bad_class.validate().is_err());

        let zero_bins = AppConfig {
            histogram_bins: 0,
            ..AppConfig::default()
        };
        assert!(zero_bins.validate().is_err());
    }

    #[test]
    fn rejects_unknown_keys() -> Result<()> {
        let path = temp_path("typo.json");
        std::fs::write(&path, r#"{ "histogram_bin": 10 }"#)?;
        let result = AppConfig::from_file_or_default(&path);
        std::fs::remove_file(&path)?;
        assert!(result.is_err());
        Ok(())
    }
}
