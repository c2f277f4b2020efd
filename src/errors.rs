use thiserror::Error;

/// Error type shared by the storage, catalog and configuration layers.
///
/// The transcript pipeline and the requirement evaluator never produce one
/// of these: a bad segment is skipped, a missing student ID is an empty
/// string.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("invalid catalog data: {0}")]
    Catalog(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
}

impl PlannerError {
    /// True for failures coming from the completed-course / catalog store.
    pub fn is_storage(&self) -> bool {
        matches!(self, PlannerError::Storage(_))
    }
}
