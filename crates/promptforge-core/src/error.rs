#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),

    #[error("encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}
