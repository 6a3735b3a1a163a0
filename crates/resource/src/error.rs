use thiserror::Error;

/// Error type for sandboxed file operations.
#[derive(Error, Debug)]
pub enum SandboxError {
    #[error("Path '{0}' is outside the PJL volumes")]
    IllegalPath(String),

    #[error("Another file write is still in progress")]
    WriteInFlight,

    #[error("Disk is locked")]
    DiskLocked,

    #[error("Short write to '{path}', download aborted")]
    ShortWrite { path: String, source: std::io::Error },

    #[error("Resource '{name}' is truncated: expected {expected} bytes, read {actual}")]
    Truncated {
        name: String,
        expected: u64,
        actual: u64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
