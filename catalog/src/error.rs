use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("error reading catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("slug '{0}' is used by more than one article")]
    DuplicateSlug(String),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}
