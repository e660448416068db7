//! Error types for the editor

use storefront_content::StoreError;
use thiserror::Error;

/// Errors that reach the host.
///
/// Interaction problems (stale selection, locked node, missing id) are
/// silent no-ops and never show up here; only saving can fail.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Failed to save content: {0}")]
    Save(#[from] StoreError),

    #[error("Failed to serialize content: {0}")]
    Serialization(#[from] serde_json::Error),
}
