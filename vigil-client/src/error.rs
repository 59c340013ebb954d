#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("preferences: {0}")]
    Io(#[from] std::io::Error),

    #[error("preferences: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("invalid API base URL {url:?}: {detail}")]
    InvalidUrl { url: String, detail: String },

    #[error("http: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error(transparent)]
    Engine(#[from] vigil_engine::EngineError),
}
