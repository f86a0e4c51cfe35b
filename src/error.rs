use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error! status: {0}")]
    Http(u16),

    #[error("invalid metrics payload: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("invalid config: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
