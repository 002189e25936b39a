use thiserror::Error;

/// PortalError
///
/// Failures owned by the portal core. Denied authorization is never one of these:
/// the gates return a `GateOutcome` for that.
#[derive(Debug, Error)]
pub enum PortalError {
    /// A page module's deferred loader failed to produce its view.
    #[error("failed to load page module {module_id}: {reason}")]
    Load { module_id: String, reason: String },

    /// Walking the pages directory failed.
    #[error("failed to scan pages directory: {0}")]
    Scan(#[from] walkdir::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A section's `_access.json` could not be parsed.
    #[error("invalid access policy {path}: {source}")]
    Policy {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type PortalResult<T> = Result<T, PortalError>;
