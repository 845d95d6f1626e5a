use crate::error::{Result, StoreError};
use std::fmt;
use std::path::PathBuf;

/// Where the dataset document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Path(PathBuf),
    Url(String),
    Inline(String),
}

impl DatasetSource {
    /// `http://` and `https://` locations are fetched, anything else is a file path.
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    pub(crate) async fn read(&self) -> Result<String> {
        match self {
            Self::Path(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| StoreError::Io {
                    path: path.display().to_string(),
                    source,
                }),
            Self::Url(url) => {
                let response = reqwest::get(url).await?.error_for_status()?;
                Ok(response.text().await?)
            }
            Self::Inline(text) => Ok(text.clone()),
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
            Self::Inline(_) => f.write_str("<inline>"),
        }
    }
}
