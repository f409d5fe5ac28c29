//! Feed error types.

use std::path::PathBuf;

/// Errors loading a feed snapshot.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// A snapshot file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A snapshot file is not valid feed JSON
    #[error("invalid feed JSON in {}: {message}", path.display())]
    Json { path: PathBuf, message: String },

    /// The background load task did not finish
    #[error("feed load interrupted: {0}")]
    Interrupted(String),
}
