//! Configuration loaded from `~/.config/community-atlas/config.toml`.
//!
//! Every key is optional. A missing file means defaults.
//!
//! ```toml
//! data_source = "https://example.org/communities.json"
//!
//! [geocoding]
//! delay_ms = 1500
//!
//! [map]
//! country_zoom = 6.0
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::camera::CameraSettings;
use crate::data::{
    DEFAULT_DATA_SOURCE, DEFAULT_SUBMISSION_URL, DEFAULT_TILE_URL, NOMINATIM_SEARCH_URL,
};
use crate::error::Result;
use crate::geocoding::{Geocoder, DEFAULT_USER_AGENT};
use crate::store::DataSource;

const CONFIG_DIR: &str = "community-atlas";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_source: String,
    pub submission_url: String,
    pub geocoding: GeocodingConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub tile_url: String,
    pub country_zoom: f64,
    /// Degrees between markers that share a location.
    pub marker_step: f64,
    pub region_fly_ms: u64,
    pub country_fly_ms: u64,
    pub min_zoom: u32,
    pub max_zoom: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA_SOURCE.to_string(),
            submission_url: DEFAULT_SUBMISSION_URL.to_string(),
            geocoding: GeocodingConfig::default(),
            map: MapConfig::default(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: NOMINATIM_SEARCH_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            delay_ms: 1000,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_url: DEFAULT_TILE_URL.to_string(),
            country_zoom: 5.0,
            marker_step: 0.3,
            region_fly_ms: 1500,
            country_fly_ms: 1000,
            min_zoom: 2,
            max_zoom: 12,
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Reads the default config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn data_source(&self) -> Result<DataSource> {
        self.data_source.parse()
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            country_zoom: self.map.country_zoom,
            country_fly: Duration::from_millis(self.map.country_fly_ms),
            region_fly: Duration::from_millis(self.map.region_fly_ms),
        }
    }

    pub fn geocoder(&self) -> Geocoder {
        Geocoder::new(
            self.geocoding.endpoint.clone(),
            self.geocoding.user_agent.clone(),
            Duration::from_millis(self.geocoding.delay_ms),
        )
    }
}
