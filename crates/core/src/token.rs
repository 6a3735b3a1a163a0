//! A `nom`-based lexer for one PJL command line.
//!
//! Words are classified in three steps: the static keyword table first, then
//! the names in the current variable table, and anything else is free-text
//! [`Token::Setting`]. All comparisons ignore ASCII case.

use crate::environment::Variable;
use crate::table::Table;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{take_till, take_till1, take_while},
    character::complete::char,
    combinator::{map, recognize, value, verify},
    sequence::preceded,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Pjl,
    Set,
    Default,
    Initialize,
    Reset,
    Inquire,
    Dinquire,
    Enter,
    FsDownload,
    FsAppend,
    FsDelete,
    FsDirList,
    FsInit,
    FsMkdir,
    FsQuery,
    FsUpload,
    FormatBinary,
    Name,
    Size,
    Volume,
    Entry,
    Count,
    Offset,
    GsSet,
    GsSetString,
}

const KEYWORDS: &[(&str, Keyword)] = &[
    ("@PJL", Keyword::Pjl),
    ("SET", Keyword::Set),
    ("DEFAULT", Keyword::Default),
    ("INITIALIZE", Keyword::Initialize),
    ("RESET", Keyword::Reset),
    ("INQUIRE", Keyword::Inquire),
    ("DINQUIRE", Keyword::Dinquire),
    ("ENTER", Keyword::Enter),
    ("FSDOWNLOAD", Keyword::FsDownload),
    ("FSAPPEND", Keyword::FsAppend),
    ("FSDELETE", Keyword::FsDelete),
    ("FSDIRLIST", Keyword::FsDirList),
    ("FSINIT", Keyword::FsInit),
    ("FSMKDIR", Keyword::FsMkdir),
    ("FSQUERY", Keyword::FsQuery),
    ("FSUPLOAD", Keyword::FsUpload),
    ("FORMAT:BINARY", Keyword::FormatBinary),
    ("NAME", Keyword::Name),
    ("SIZE", Keyword::Size),
    ("VOLUME", Keyword::Volume),
    ("ENTRY", Keyword::Entry),
    ("COUNT", Keyword::Count),
    ("OFFSET", Keyword::Offset),
    ("GSSET", Keyword::GsSet),
    ("GSSETSTRING", Keyword::GsSetString),
];

impl Keyword {
    pub fn lookup(word: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(text, _)| text.eq_ignore_ascii_case(word))
            .map(|&(_, kw)| kw)
    }

    pub fn as_str(self) -> &'static str {
        KEYWORDS
            .iter()
            .find(|&&(_, kw)| kw == self)
            .map_or("", |&(text, _)| text)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Keyword(Keyword),
    /// A name present in the current variable table.
    Variable(String),
    /// Any other word, quotes included when the word was quoted.
    Setting(String),
    Equal,
    /// End of line, or a line that cannot be tokenized further.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme<'a> {
    Equal,
    Word(&'a [u8]),
}

fn is_delimiter(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'=' | 0)
}

fn blanks(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while(|b: u8| b == b' ' || b == b'\t').parse(input)
}

/// `"..."` on one line. An unterminated quote does not match.
fn quoted(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize((
        char('"'),
        take_till(|b: u8| b == b'"' || b == b'\n' || b == 0),
        char('"'),
    ))
    .parse(input)
}

fn bare_word(input: &[u8]) -> IResult<&[u8], &[u8]> {
    verify(take_till1(is_delimiter), |word: &[u8]| {
        word.first() != Some(&b'"')
    })
    .parse(input)
}

fn lexeme(input: &[u8]) -> IResult<&[u8], Lexeme<'_>> {
    preceded(
        blanks,
        alt((
            value(Lexeme::Equal, char('=')),
            map(quoted, Lexeme::Word),
            map(bare_word, Lexeme::Word),
        )),
    )
    .parse(input)
}

/// Splits one line into tokens.
///
/// Iteration stops at the first [`Token::Done`]; [`Lexer::next_token`]
/// keeps returning `Done` from then on.
#[derive(Debug)]
pub struct Lexer<'a> {
    rest: &'a [u8],
    variables: &'a Table<Variable>,
}

impl<'a> Lexer<'a> {
    pub fn new(line: &'a [u8], variables: &'a Table<Variable>) -> Self {
        Self {
            rest: line,
            variables,
        }
    }

    pub fn next_token(&mut self) -> Token {
        match lexeme(self.rest) {
            Ok((rest, lexeme)) => {
                self.rest = rest;
                match lexeme {
                    Lexeme::Equal => Token::Equal,
                    Lexeme::Word(word) => self.classify(word),
                }
            }
            Err(_) => {
                self.rest = &[];
                Token::Done
            }
        }
    }

    fn classify(&self, word: &[u8]) -> Token {
        let text = String::from_utf8_lossy(word).into_owned();
        if let Some(kw) = Keyword::lookup(&text) {
            Token::Keyword(kw)
        } else if self.variables.contains(&text) {
            Token::Variable(text)
        } else {
            Token::Setting(text)
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token::Done => None,
            token => Some(token),
        }
    }
}
