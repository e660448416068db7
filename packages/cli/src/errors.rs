use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Input path does not exist: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("No store record given; pass --store or --domain")]
    NoStore,

    #[error("Store not found: {0}")]
    StoreNotFound(String),

    #[error("{count} element id(s) differ between the live tree and the markup scan")]
    IdMismatch { count: usize },
}
