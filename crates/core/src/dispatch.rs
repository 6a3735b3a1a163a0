//! Executes parsed commands against a [`ParserState`].

use crate::command::Command;
use crate::error::PjlError;
use crate::state::ParserState;
use crate::table::Layer;
use crate::token::{Lexer, Token};
use pjl_traits::ParamAssignment;
use pjl_types::compare;

/// What a successfully executed line hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Done,
    /// `FSDIRLIST` entry names.
    DirList(Vec<String>),
}

impl ParserState {
    /// Tokenizes, parses and executes one line (without its terminator).
    pub fn execute_line(&mut self, line: &[u8]) -> Result<Response, PjlError> {
        let tokens: Vec<Token> =
            Lexer::new(line, self.environment.table(Layer::Current)).collect();
        let command = Command::parse(tokens)?;
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> Result<Response, PjlError> {
        log::debug!("executing {:?}", command);
        let disk_locked = self.is_disk_locked();
        match command {
            Command::Empty => {}
            Command::Set { layer, name, value } => self.assign(layer, &name, &value),
            Command::Initialize => {
                self.environment.init_from_factory(Layer::Defaults);
                self.font_sources.init_from_factory(Layer::Defaults);
                self.font_sources.refresh_font_numbers(
                    Layer::Defaults,
                    self.sandbox.filesystem(),
                    &self.config.font_root,
                );
            }
            Command::Reset => {
                self.environment.init_from_factory(Layer::Current);
                self.font_sources.init_from_factory(Layer::Current);
                self.font_sources.refresh_font_numbers(
                    Layer::Current,
                    self.sandbox.filesystem(),
                    &self.config.font_root,
                );
            }
            Command::FsDownload { name, size, kind } => {
                self.sandbox.begin_write(&name, size, kind, disk_locked)?;
            }
            Command::FsDelete { name } => self.sandbox.delete(&name, disk_locked)?,
            Command::FsDirList { name, entry, count } => {
                let entries = self.sandbox.list_dir(&name, disk_locked)?;
                log::debug!("FSDIRLIST ENTRY={} COUNT={} not applied", entry, count);
                for entry in &entries {
                    log::info!("{}", entry);
                }
                return Ok(Response::DirList(entries));
            }
            Command::FsInit { volume } => self.sandbox.init_volume(&volume, disk_locked)?,
            Command::FsMkdir { name } => self.sandbox.make_dir(&name, disk_locked)?,
            Command::FsQuery { .. } => return Err(PjlError::Unsupported("FSQUERY")),
            Command::FsUpload { .. } => return Err(PjlError::Unsupported("FSUPLOAD")),
            Command::GsSet { key, value, kind } => {
                self.params.set_param(ParamAssignment { key, value, kind })?;
            }
        }
        Ok(Response::Done)
    }

    /// `SET`/`DEFAULT`. An explicit `FORMLINES` also raises `FORMLINES_SET`.
    fn assign(&mut self, layer: Layer, name: &str, value: &str) {
        let explicit_formlines = compare(name, "formlines");
        match layer {
            Layer::Current => {
                if explicit_formlines {
                    self.environment.set(Layer::Current, "formlines_set", "on");
                }
                self.environment.set(Layer::Current, name, value);
            }
            Layer::Defaults => {
                if explicit_formlines {
                    self.environment.set_default("formlines_set", "on");
                }
                self.environment.set_default(name, value);
            }
        }
    }
}
