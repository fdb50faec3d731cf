use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid data source: {0}")]
    InvalidDataSource(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("No match for {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
