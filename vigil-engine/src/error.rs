#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The scan is listed but its detail has not been written yet (or was
    /// never this store's to begin with). Callers treat this as "not yet
    /// available" rather than a failure.
    #[error("scan not found: {0}")]
    ScanNotFound(String),
}
