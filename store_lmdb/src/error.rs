use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(String),

    #[error("i/o error: {0}")]
    Io(String),
}

impl From<LmdbError> for granary_store::StoreError {
    fn from(e: LmdbError) -> Self {
        granary_store::StoreError::Backend(e.to_string())
    }
}
