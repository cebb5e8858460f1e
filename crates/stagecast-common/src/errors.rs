#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("content path is empty")]
    EmptyPath,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("zoom store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zoom store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no zoom store path available")]
    NoStorePath,
}

#[derive(Debug, thiserror::Error)]
pub enum WebDisplayError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0}")]
    Other(String),
}
