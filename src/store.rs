//! One-shot load of the community list.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::{error, info, warn};

use crate::data::{Community, BUNDLED_DATA_SOURCE};
use crate::error::{Error, Result};

/// Community list compiled into the binary, so the app works from any directory.
pub const BUNDLED_COMMUNITIES: &str = include_str!("../data/communities.json");

#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Bundled,
    Url(String),
    Path(PathBuf),
}

impl FromStr for DataSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidDataSource("empty".to_string()));
        }
        if s.eq_ignore_ascii_case(BUNDLED_DATA_SOURCE) {
            Ok(DataSource::Bundled)
        } else if s.starts_with("http://") || s.starts_with("https://") {
            Ok(DataSource::Url(s.to_string()))
        } else {
            Ok(DataSource::Path(PathBuf::from(shell_path(s))))
        }
    }
}

fn shell_path(s: &str) -> String {
    match (s.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().into_owned(),
        _ => s.to_string(),
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Bundled => f.write_str("the bundled list"),
            DataSource::Url(url) => f.write_str(url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Parses the JSON array and drops entries with a blank country.
pub fn parse_communities(text: &str) -> Result<Vec<Community>> {
    let mut communities: Vec<Community> = serde_json::from_str(text)?;
    let before = communities.len();
    communities.retain(|c| !c.country.trim().is_empty());
    if communities.len() != before {
        warn!(
            "Dropped {} communities without a country",
            before - communities.len()
        );
    }
    Ok(communities)
}

pub async fn try_load(source: &DataSource) -> Result<Vec<Community>> {
    let text = match source {
        DataSource::Bundled => return parse_communities(BUNDLED_COMMUNITIES),
        DataSource::Url(url) => {
            reqwest::get(url)
                .await?
                .error_for_status()?
                .text()
                .await?
        }
        DataSource::Path(path) => tokio::fs::read_to_string(path).await?,
    };
    parse_communities(&text)
}

/// Loads the list once. Any failure is logged and yields an empty directory.
pub async fn load_communities(source: &DataSource) -> Vec<Community> {
    match try_load(source).await {
        Ok(communities) => {
            info!("Loaded {} communities from {}", communities.len(), source);
            communities
        }
        Err(e) => {
            error!("Error loading communities from {}: {}", source, e);
            Vec::new()
        }
    }
}
