use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "materials.toml";
/// Overrides `[dataset] source`
pub const DATASET_ENV: &str = "MATERIALS_DATASET";

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
    pub version: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "Materials Database".to_string(),
            version: "1.0.0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositorySection {
    /// Where contributors open pull requests
    pub url: String,
}

impl Default for RepositorySection {
    fn default() -> Self {
        Self {
            url: "https://github.com/tommo395/material-database".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetSection {
    /// Path or http(s) URL of the dataset document
    pub source: String,
}

impl Default for DatasetSection {
    fn default() -> Self {
        Self {
            source: "data.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSection {
    /// 0.0 exact, 1.0 anything
    pub threshold: f64,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            threshold: materials_search::DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseSection {
    /// Widths below this are mobile
    pub mobile_breakpoint: u32,
    pub mobile_page_size: usize,
    pub desktop_page_size: usize,
}

impl Default for BrowseSection {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768,
            mobile_page_size: 24,
            desktop_page_size: 32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareSection {
    pub capacity: usize,
}

impl Default for CompareSection {
    fn default() -> Self {
        Self {
            capacity: materials_compare::DEFAULT_CAPACITY,
        }
    }
}

/// Catalog configuration (`materials.toml`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub app: AppSection,
    pub repository: RepositorySection,
    pub dataset: DatasetSection,
    pub search: SearchSection,
    pub browse: BrowseSection,
    pub compare: CompareSection,
}

impl CatalogConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    /// Resolve the effective configuration.
    ///
    /// Explicit path first, then `materials.toml` in `workdir`, then
    /// defaults. `MATERIALS_DATASET` and then `dataset_override` replace the
    /// dataset source.
    pub fn resolve(
        explicit: Option<&Path>,
        workdir: &Path,
        dataset_override: Option<&str>,
    ) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let candidate = workdir.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    log::debug!("Using config {}", candidate.display());
                    Self::from_file(&candidate)?
                } else {
                    Self::default()
                }
            }
        };

        if let Ok(source) = env::var(DATASET_ENV) {
            if !source.trim().is_empty() {
                config.dataset.source = source;
            }
        }
        if let Some(source) = dataset_override {
            config.dataset.source = source.to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.search.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid(format!(
                "search.threshold ({threshold}) must be within 0.0..=1.0"
            )));
        }
        if self.compare.capacity == 0 {
            return Err(ConfigError::Invalid("compare.capacity must be >= 1".to_string()));
        }
        if self.browse.mobile_page_size == 0 || self.browse.desktop_page_size == 0 {
            return Err(ConfigError::Invalid("browse page sizes must be >= 1".to_string()));
        }
        if self.dataset.source.trim().is_empty() {
            return Err(ConfigError::Invalid("dataset.source is empty".to_string()));
        }
        Ok(())
    }
}
