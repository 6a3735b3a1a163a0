//! Error types for PJL line processing.

use pjl_resource::SandboxError;
use pjl_traits::ParamError;
use thiserror::Error;

/// Why a single PJL line (or a streamed download) failed.
///
/// Every variant except a streaming-write failure is local to one line; the
/// parser carries on with the next line.
#[derive(Error, Debug)]
pub enum PjlError {
    #[error("Line does not start with @PJL")]
    NotPjl,

    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Unknown PJL command '{0}'")]
    UnknownCommand(String),

    #[error("File operation rejected: {0}")]
    Sandbox(#[from] SandboxError),

    #[error("Parameter forwarding failed: {0}")]
    Param(#[from] ParamError),

    #[error("{0} is not implemented")]
    Unsupported(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pjl_error_display() {
        let err = PjlError::UnknownCommand("COMMENT".to_string());
        assert!(err.to_string().contains("COMMENT"));

        let err = PjlError::Unsupported("FSQUERY");
        assert_eq!(err.to_string(), "FSQUERY is not implemented");
    }

    #[test]
    fn test_pjl_error_from_sandbox_error() {
        let err: PjlError = SandboxError::DiskLocked.into();
        assert!(matches!(err, PjlError::Sandbox(SandboxError::DiskLocked)));
    }
}
