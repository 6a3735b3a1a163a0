//! # pjl-core
//!
//! The PJL (Printer Job Language) control-channel parser.
//!
//! This crate turns a raw print-job byte stream into environment updates:
//! - **framer**: line accumulation, UEL handling, download siphoning
//! - **token** / **command**: per-line lexing and parsing into [`Command`]
//! - **dispatch**: command execution against a [`ParserState`]
//! - **environment** / **side_effects**: the two-layer variable store
//! - **fontsource** / **softfont**: font-source resolution and soft-font slots
//! - **config** / **error**: configuration and error types
//!
//! ## Design Principle
//!
//! Filesystem access goes through [`pjl_traits::HostFilesystem`] and every
//! file command is confined to the two sandbox volumes of
//! [`pjl_resource::Sandbox`]. Parameter forwarding (`GSSET`) goes through
//! [`pjl_traits::ParamSink`].

// Re-export foundation crates
pub use pjl_resource as resource;
pub use pjl_traits as traits;
pub use pjl_types as types;

pub mod command;
pub mod config;
pub mod dispatch;
pub mod environment;
pub mod error;
pub mod fontsource;
pub mod framer;
pub mod side_effects;
pub mod softfont;
pub mod state;
pub mod table;
pub mod token;

pub use command::Command;
pub use config::ParserConfig;
pub use dispatch::Response;
pub use environment::{Environment, Variable};
pub use error::PjlError;
pub use fontsource::{FontSourceEntry, FontSources};
pub use framer::{FeedStatus, ReadCursor, UEL, skip_to_uel};
pub use softfont::{SOFT_FONT_SLOTS, SoftFontRegistry};
pub use state::{EnvironmentSnapshot, ParserBuilder, ParserState};
pub use table::{Layer, Layered, Row, Table};
pub use token::{Keyword, Lexer, Token};

// Re-export commonly used types from foundation crates
pub use types::{Designator, compare, symbol_set_name_to_code, to_float, to_int};
