//! Subcommand implementations.

pub mod detail;
pub mod seed;

use marketplace_api::db::RepositoryError;
use marketplace_api::services::CatalogError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Reading or writing the data file failed.
    #[error("Data file error: {0}")]
    Store(#[from] RepositoryError),

    /// The catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
