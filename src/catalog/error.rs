use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog file read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid geometry in {context}: {message}")]
    InvalidGeometry { context: String, message: String },
    #[error("unknown satellite: {0}")]
    UnknownSatellite(String),
}
