//! ParamSink trait for forwarding `GSSET`/`GSSETSTRING` assignments.
//!
//! These commands bypass the PJL environment entirely and hand a
//! `key[=value]` assignment to the host's generic parameter setter.

use std::fmt::{self, Debug};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Error type for parameter forwarding.
#[derive(Error, Debug, Clone)]
pub enum ParamError {
    #[error("Parameter '{key}' rejected: {message}")]
    Rejected { key: String, message: String },
}

/// How the host should interpret the forwarded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// `GSSETSTRING`: the value is always a string.
    String,
    /// `GSSET`: the host parses the value into whatever type it needs.
    Typed,
}

/// A single forwarded assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamAssignment {
    pub key: String,
    pub value: Option<String>,
    pub kind: ParamKind,
}

impl fmt::Display for ParamAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => f.write_str(&self.key),
        }
    }
}

/// The host's generic parameter-setting callback.
pub trait ParamSink: Send + Sync + Debug {
    fn set_param(&self, assignment: ParamAssignment) -> Result<(), ParamError>;
}

/// A parameter sink that records every assignment in memory.
///
/// Clones share the same record, so a caller can keep one handle while the
/// parser owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingParamSink {
    params: Arc<RwLock<Vec<ParamAssignment>>>,
}

impl RecordingParamSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    ///
    /// Returns an empty list if the lock is poisoned.
    pub fn recorded(&self) -> Vec<ParamAssignment> {
        self.params.read().map(|p| p.clone()).unwrap_or_default()
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.params.read().map(|p| p.len()).unwrap_or(0)
    }

    /// Returns `true` if the lock is poisoned (safe default).
    pub fn is_empty(&self) -> bool {
        self.params.read().map(|p| p.is_empty()).unwrap_or(true)
    }
}

impl ParamSink for RecordingParamSink {
    fn set_param(&self, assignment: ParamAssignment) -> Result<(), ParamError> {
        let mut params = self.params.write().map_err(|_| ParamError::Rejected {
            key: assignment.key.clone(),
            message: "parameter record lock poisoned".to_string(),
        })?;
        params.push(assignment);
        Ok(())
    }
}
