use std::path::PathBuf;

/// Errors produced while compiling or executing a search.
///
/// `InvalidQuery` comes from compiling an empty query directly; searches
/// answer empty queries before compiling. A bad pattern turns into an empty
/// result and a tombstoned slot or an over-long path excludes that one entry,
/// so `PoolUnavailable` is the error completion callbacks actually see.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Pattern compile failure: {0}")]
    CompileFailure(String),

    #[error("Entry unavailable at index {0}")]
    EntryUnavailable(usize),

    #[error("Reconstructed path exceeds {limit} bytes")]
    PathTooLong { limit: usize },

    #[error("Worker pool unavailable: {0}")]
    PoolUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid path list {path}: {message}")]
    PathList { path: PathBuf, message: String },
}

impl SearchError {
    /// Whether the error only affects a single entry and must never abort a batch.
    pub fn is_entry_level(&self) -> bool {
        matches!(
            self,
            SearchError::EntryUnavailable(_) | SearchError::PathTooLong { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
