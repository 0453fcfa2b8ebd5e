//! CLI errors.

use checkforge_core::{ExportError, LayoutFileError, PersistenceError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    LayoutFile(#[from] LayoutFileError),
    #[error("Invalid check fields: {0}")]
    Fields(#[from] serde_json::Error),
    #[error("{0}")]
    Input(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
