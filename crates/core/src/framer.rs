//! Splits a raw byte stream into PJL command lines.
//!
//! The stream arrives in caller-sized chunks through a [`ReadCursor`].
//! Bytes the framer cannot decide on yet (a partial UEL, a partial `@PJL`)
//! are left unconsumed; the caller presents them again together with the
//! next chunk.

use crate::error::PjlError;
use crate::state::ParserState;

/// Universal Exit Language escape.
pub const UEL: &[u8] = b"\x1b%-12345X";

const PJL_PREFIX: &[u8] = b"@PJL";

/// A read position over one chunk of input.
#[derive(Debug, Clone, Copy)]
pub struct ReadCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Unconsumed bytes.
    pub fn remaining(&self) -> &'a [u8] {
        let data: &'a [u8] = self.data;
        &data[self.pos..]
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn advance(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.data.len());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    /// The chunk is used up, or ends in bytes that need more input to
    /// classify.
    NeedMoreInput,
    /// The cursor sits on data that is not PJL; another interpreter takes
    /// over from here.
    NotPjl,
}

enum LineStart {
    Line,
    Uel,
    NeedMoreInput,
    NotPjl,
}

/// `Some(true)` if `data` starts with `pattern`, `None` if it is a proper
/// prefix of it.
fn match_prefix(data: &[u8], pattern: &[u8], ignore_case: bool) -> Option<bool> {
    let len = data.len().min(pattern.len());
    let same = if ignore_case {
        data[..len].eq_ignore_ascii_case(&pattern[..len])
    } else {
        data[..len] == pattern[..len]
    };
    match (same, data.len() < pattern.len()) {
        (false, _) => Some(false),
        (true, true) => None,
        (true, false) => Some(true),
    }
}

fn is_legal(b: u8) -> bool {
    b >= b' ' || matches!(b, b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Discards input up to and including the next UEL.
///
/// Returns `true` once a UEL has been consumed. A UEL cut off by the end of
/// the chunk is left in place so it can be recognized on the next call.
pub fn skip_to_uel(cursor: &mut ReadCursor<'_>) -> bool {
    let rest = cursor.remaining();
    for (offset, _) in rest.iter().enumerate().filter(|&(_, &b)| b == UEL[0]) {
        match match_prefix(&rest[offset..], UEL, false) {
            Some(true) => {
                cursor.advance(offset + UEL.len());
                return true;
            }
            None => {
                cursor.advance(offset);
                return false;
            }
            Some(false) => {}
        }
    }
    cursor.advance(rest.len());
    false
}

impl ParserState {
    /// Consumes PJL from `cursor` until the chunk runs out or non-PJL data
    /// shows up.
    ///
    /// Complete lines are executed as they are found; a failing line is
    /// logged and skipped. Raw bytes owed to an `FSDOWNLOAD`/`FSAPPEND` are
    /// written out before any further line is read, and a failure writing
    /// them is the only error returned.
    pub fn feed(&mut self, cursor: &mut ReadCursor<'_>) -> Result<FeedStatus, PjlError> {
        loop {
            if self.sandbox.is_writing() {
                let written = self.sandbox.write_pending(cursor.remaining())?;
                cursor.advance(written);
                if self.sandbox.is_writing() {
                    return Ok(FeedStatus::NeedMoreInput);
                }
            }
            if cursor.is_empty() {
                return Ok(FeedStatus::NeedMoreInput);
            }

            if self.line.is_empty() {
                match self.line_start(cursor) {
                    LineStart::Line => {}
                    LineStart::Uel => continue,
                    LineStart::NeedMoreInput => return Ok(FeedStatus::NeedMoreInput),
                    LineStart::NotPjl => return Ok(FeedStatus::NotPjl),
                }
            }

            let rest = cursor.remaining();
            let Some(end) = rest.iter().position(|&b| b == b'\n' || !is_legal(b)) else {
                self.append_line(rest);
                cursor.advance(rest.len());
                return Ok(FeedStatus::NeedMoreInput);
            };
            self.append_line(&rest[..end]);
            cursor.advance(end);

            if rest[end] == b'\n' {
                cursor.advance(1);
                self.dispatch_line();
            } else {
                log::debug!("control byte {:#04x} ends PJL", rest[end]);
                self.dispatch_line();
                return Ok(FeedStatus::NotPjl);
            }
        }
    }

    fn line_start(&mut self, cursor: &mut ReadCursor<'_>) -> LineStart {
        let rest = cursor.remaining();
        match match_prefix(rest, UEL, false) {
            Some(true) => {
                log::debug!("UEL");
                cursor.advance(UEL.len());
                return LineStart::Uel;
            }
            None => return LineStart::NeedMoreInput,
            Some(false) => {}
        }

        let mut skip = 0;
        if rest.get(skip) == Some(&b'\r') {
            skip += 1;
        }
        if rest.get(skip) == Some(&b'\n') {
            skip += 1;
        }
        match match_prefix(&rest[skip..], PJL_PREFIX, true) {
            Some(true) => {
                cursor.advance(skip);
                LineStart::Line
            }
            None => LineStart::NeedMoreInput,
            Some(false) => LineStart::NotPjl,
        }
    }

    /// Appends to the line buffer, growing it in fixed steps.
    fn append_line(&mut self, bytes: &[u8]) {
        let needed = self.line.len() + bytes.len();
        if needed > self.line.capacity() {
            let step = self.config.line_growth.max(1);
            let target = needed.div_ceil(step) * step;
            self.line.reserve_exact(target - self.line.len());
        }
        self.line.extend_from_slice(bytes);
    }

    fn dispatch_line(&mut self) {
        if self.line.is_empty() {
            return;
        }
        let line = std::mem::take(&mut self.line);
        if let Err(e) = self.execute_line(&line) {
            log::warn!("PJL line '{}' failed: {}", String::from_utf8_lossy(&line).trim_end(), e);
        }
        self.line = line;
        self.line.clear();
    }
}
