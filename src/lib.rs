//! # pjl
//!
//! Printer Job Language parsing for print-job streams.
//!
//! The parser itself lives in `pjl-core`; this crate re-exports its API and
//! adds [`run_job`], which walks a complete job stream through a
//! [`ParserState`], skipping page description data between UELs.

pub mod error;
pub mod job;

pub use error::JobError;
pub use job::{CHUNK_SIZE, JobSummary, run_job, run_job_chunked};

pub use pjl_core::{
    Command, Designator, Environment, EnvironmentSnapshot, FeedStatus, FontSourceEntry,
    FontSources, Keyword, Layer, Lexer, ParserBuilder, ParserConfig, ParserState, PjlError,
    ReadCursor, Response, SOFT_FONT_SLOTS, SoftFontRegistry, Token, UEL, Variable, compare,
    skip_to_uel, symbol_set_name_to_code, to_float, to_int,
};
pub use pjl_resource::{Sandbox, SandboxError, StdFilesystem, Volumes, WriteKind};
pub use pjl_traits::{
    DirEntry, HostFile, HostFilesystem, OpenMode, ParamAssignment, ParamError, ParamKind,
    ParamSink, RecordingParamSink,
};
