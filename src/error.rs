// src/error.rs
use pjl_core::PjlError;
use thiserror::Error;

/// Errors that end a job run.
#[derive(Error, Debug)]
pub enum JobError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PJL stream failed: {0}")]
    Pjl(#[from] PjlError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}
