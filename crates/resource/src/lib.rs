//! Filesystem side of the PJL parser.
//!
//! ## Components
//!
//! - [`StdFilesystem`]: `HostFilesystem` backed by `std::fs`
//! - [`Volumes`] / [`Sandbox`]: maps PJL volume paths (`0:`, `1:`) onto two
//!   host directories and guards every file operation against them
//! - [`ResourceLocator`]: finds a named file anywhere under the volumes

mod error;
mod filesystem;
mod locator;
mod sandbox;

pub use error::SandboxError;
pub use filesystem::StdFilesystem;
pub use locator::ResourceLocator;
pub use sandbox::{MAX_PATH_LEN, Sandbox, Volumes, WriteKind};
