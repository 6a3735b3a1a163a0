//! Turns the tokens of one line into a [`Command`].

use crate::error::PjlError;
use crate::table::Layer;
use crate::token::{Keyword, Token};
use pjl_resource::{MAX_PATH_LEN, WriteKind};
use pjl_traits::ParamKind;
use pjl_types::{to_int, try_to_int};
use std::iter::Peekable;
use std::vec::IntoIter;

/// One parsed `@PJL` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing to do: a bare `@PJL`, or a `SET`/`DEFAULT`/`ENTER` naming no
    /// known variable.
    Empty,
    Set {
        layer: Layer,
        name: String,
        value: String,
    },
    /// Restores the user defaults, both axes, from the factory tables.
    Initialize,
    /// Restores the current environment, both axes, from the factory tables.
    /// Current font numbers are then re-probed from the host, so sources
    /// with fonts on disk stay usable instead of reading as empty.
    Reset,
    /// `FSDOWNLOAD` (truncate) or `FSAPPEND`.
    FsDownload {
        name: String,
        size: u64,
        kind: WriteKind,
    },
    FsDelete {
        name: String,
    },
    FsDirList {
        name: String,
        entry: i64,
        count: i64,
    },
    FsInit {
        volume: String,
    },
    FsMkdir {
        name: String,
    },
    FsQuery {
        name: String,
    },
    FsUpload {
        name: String,
        offset: u64,
        size: u64,
    },
    /// `GSSET` / `GSSETSTRING`
    GsSet {
        key: String,
        value: Option<String>,
        kind: ParamKind,
    },
}

impl Command {
    /// Parses a full line's tokens, `@PJL` prefix included.
    pub fn parse(tokens: Vec<Token>) -> Result<Self, PjlError> {
        let mut args = Args {
            tokens: tokens.into_iter().peekable(),
        };
        if args.next() != Some(Token::Keyword(Keyword::Pjl)) {
            return Err(PjlError::NotPjl);
        }
        let keyword = match args.next() {
            None | Some(Token::Done) => return Ok(Command::Empty),
            Some(Token::Keyword(kw)) => kw,
            Some(Token::Variable(word) | Token::Setting(word)) => {
                return Err(PjlError::UnknownCommand(word));
            }
            Some(Token::Equal) => return Err(PjlError::UnknownCommand("=".to_string())),
        };

        match keyword {
            Keyword::Set | Keyword::Enter => args.assignment(Layer::Current),
            Keyword::Default => args.assignment(Layer::Defaults),
            Keyword::Initialize => Ok(Command::Initialize),
            Keyword::Reset => Ok(Command::Reset),
            Keyword::FsDownload | Keyword::FsAppend => {
                args.skip_format_binary();
                let name = args.path(Keyword::Name)?;
                let size = args.size(Keyword::Size)?;
                let kind = if keyword == Keyword::FsAppend {
                    WriteKind::Append
                } else {
                    WriteKind::Download
                };
                Ok(Command::FsDownload { name, size, kind })
            }
            Keyword::FsDelete => Ok(Command::FsDelete {
                name: args.path(Keyword::Name)?,
            }),
            Keyword::FsDirList => {
                let name = args.path(Keyword::Name)?;
                let entry = to_int(&args.setting(Keyword::Entry)?);
                let count = to_int(&args.setting(Keyword::Count)?);
                Ok(Command::FsDirList { name, entry, count })
            }
            Keyword::FsInit => Ok(Command::FsInit {
                volume: args.path(Keyword::Volume)?,
            }),
            Keyword::FsMkdir => Ok(Command::FsMkdir {
                name: args.path(Keyword::Name)?,
            }),
            Keyword::FsQuery => Ok(Command::FsQuery {
                name: args.path(Keyword::Name)?,
            }),
            Keyword::FsUpload => {
                args.skip_format_binary();
                let name = args.path(Keyword::Name)?;
                let offset = args.size(Keyword::Offset)?;
                let size = args.size(Keyword::Size)?;
                Ok(Command::FsUpload { name, offset, size })
            }
            Keyword::GsSet => Ok(args.param(ParamKind::Typed)),
            Keyword::GsSetString => Ok(args.param(ParamKind::String)),
            other => Err(PjlError::UnknownCommand(other.to_string())),
        }
    }
}

struct Args {
    tokens: Peekable<IntoIter<Token>>,
}

impl Args {
    fn next(&mut self) -> Option<Token> {
        self.tokens.next()
    }

    /// `<anything>* VARIABLE = SETTING`. Words before the variable are
    /// skipped; no variable at all is not an error.
    fn assignment(&mut self, layer: Layer) -> Result<Command, PjlError> {
        let Some(name) = self.tokens.find_map(|token| match token {
            Token::Variable(name) => Some(name),
            _ => None,
        }) else {
            return Ok(Command::Empty);
        };
        if self.next() != Some(Token::Equal) {
            return Err(PjlError::Syntax(format!("expected '=' after {}", name)));
        }
        match self.next() {
            Some(Token::Setting(value)) => Ok(Command::Set { layer, name, value }),
            _ => Err(PjlError::Syntax(format!("missing value for {}", name))),
        }
    }

    /// `KEYWORD = SETTING`
    fn setting(&mut self, keyword: Keyword) -> Result<String, PjlError> {
        let expected = || PjlError::Syntax(format!("expected {}=<value>", keyword));
        if self.next() != Some(Token::Keyword(keyword)) || self.next() != Some(Token::Equal) {
            return Err(expected());
        }
        match self.next() {
            Some(Token::Setting(value)) => Ok(value),
            _ => Err(expected()),
        }
    }

    fn path(&mut self, keyword: Keyword) -> Result<String, PjlError> {
        let path = self.setting(keyword)?;
        if path.len() > MAX_PATH_LEN {
            return Err(PjlError::Syntax(format!(
                "path name longer than {} bytes",
                MAX_PATH_LEN
            )));
        }
        Ok(path)
    }

    fn size(&mut self, keyword: Keyword) -> Result<u64, PjlError> {
        let text = self.setting(keyword)?;
        let value = try_to_int(&text)
            .ok_or_else(|| PjlError::Syntax(format!("{} '{}' out of range", keyword, text)))?;
        u64::try_from(value)
            .map_err(|_| PjlError::Syntax(format!("negative {} '{}'", keyword, text)))
    }

    fn skip_format_binary(&mut self) {
        self.tokens
            .next_if_eq(&Token::Keyword(Keyword::FormatBinary));
    }

    /// `(VARIABLE | SETTING) [= SETTING]`, taking the first candidate name.
    fn param(&mut self, kind: ParamKind) -> Command {
        let Some(key) = self.tokens.find_map(|token| match token {
            Token::Variable(word) | Token::Setting(word) => Some(word),
            _ => None,
        }) else {
            return Command::Empty;
        };
        let value = match (self.next(), self.next()) {
            (Some(Token::Equal), Some(Token::Setting(value))) => Some(value),
            _ => None,
        };
        Command::GsSet { key, value, kind }
    }
}
