//! Application error types and exit-code mapping.
//!
//! Defines `AppError` for all handler-level failures and maps each to a
//! process exit code. The router never produces an `AppError`: an
//! unmatched route is reported as an ordinary `None` by the dispatcher
//! and translated by the caller.
//!
//! Exit-code mappings:
//! - `Git`, `RepoNotFound` → 2
//! - `RefNotFound`, `ObjectNotFound` → 3
//! - `WrongObjectType` → 4
//! - `Writer`, `Io` → 5

use thiserror::Error;

use crate::json::WriterError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Could not open repository: {0}")]
    RepoNotFound(String),

    #[error("Reference not found: {0}")]
    RefNotFound(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("'{spec}' does not reference a {expected}")]
    WrongObjectType {
        spec: String,
        expected: &'static str,
    },

    #[error("JSON output error: {0}")]
    Writer(#[from] WriterError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit code reported when this error reaches `main`.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Git(_) | AppError::RepoNotFound(_) => 2,
            AppError::RefNotFound(_) | AppError::ObjectNotFound(_) => 3,
            AppError::WrongObjectType { .. } => 4,
            AppError::Writer(_) | AppError::Io(_) => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
