//! Error types for the staging pipeline

use nuxstage_protocol::ServiceBinding;
use std::io;
use thiserror::Error;

/// Staging error type
///
/// Every failure aborts the whole staging attempt; there is no
/// partial-success state to resume from. The two binding errors are the
/// interesting ones: `UnknownBinding` flags an internal consistency bug,
/// `MissingCredentials` an upstream broker contract violation. Exit-code
/// mapping happens in `main`, never here.
#[derive(Error, Debug)]
pub enum StagingError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unable to configure unknown database: {0}")]
    UnknownBinding(ServiceBinding),

    #[error("Database binding failed to include credentials: {0}")]
    MissingCredentials(ServiceBinding),

    #[error("Archive layout error: {0}")]
    ArchiveLayout(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StagingError>;
