pub mod host;
pub mod param;

pub use host::{DirEntry, HostFile, HostFilesystem, OpenMode};
pub use param::{ParamAssignment, ParamError, ParamKind, ParamSink, RecordingParamSink};
