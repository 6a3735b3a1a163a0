// src/job.rs
//! Drives a whole print job through a [`ParserState`].
//!
//! PJL sections are fed to the parser; when it reports non-PJL data the
//! runner skips ahead to the next UEL, which starts a new job.

use crate::error::JobError;
use pjl_core::{FeedStatus, ParserState, ReadCursor, UEL, skip_to_uel};
use serde::Serialize;
use std::io::Read;

/// Bytes read from the job source per call.
pub const CHUNK_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Pjl,
    SkipToUel,
}

/// What a job run went through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    /// Non-PJL (page description) sections encountered.
    pub pdl_sections: usize,
    /// Bytes of page description data skipped over.
    pub skipped_bytes: u64,
    /// UELs that started a new job after page description data.
    pub jobs: usize,
}

/// Runs everything `reader` yields through `pjl`.
pub fn run_job<R: Read>(pjl: &mut ParserState, reader: R) -> Result<JobSummary, JobError> {
    run_job_chunked(pjl, reader, CHUNK_SIZE)
}

/// [`run_job`] with an explicit read size.
pub fn run_job_chunked<R: Read>(
    pjl: &mut ParserState,
    mut reader: R,
    chunk_size: usize,
) -> Result<JobSummary, JobError> {
    let mut summary = JobSummary::default();
    let mut pending: Vec<u8> = Vec::new();
    let mut chunk = vec![0u8; chunk_size.max(1)];
    let mut mode = Mode::Pjl;

    loop {
        let read = reader.read(&mut chunk)?;
        pending.extend_from_slice(&chunk[..read]);

        loop {
            let mut cursor = ReadCursor::new(&pending);
            let switched = match mode {
                Mode::Pjl => {
                    let not_pjl = pjl.feed(&mut cursor)? == FeedStatus::NotPjl;
                    if not_pjl {
                        summary.pdl_sections += 1;
                        mode = Mode::SkipToUel;
                    }
                    not_pjl
                }
                Mode::SkipToUel => {
                    let found = skip_to_uel(&mut cursor);
                    let consumed = cursor.position() as u64;
                    if found {
                        summary.skipped_bytes += consumed - UEL.len() as u64;
                        summary.jobs += 1;
                        pjl.begin_job();
                        mode = Mode::Pjl;
                    } else {
                        summary.skipped_bytes += consumed;
                    }
                    found
                }
            };
            let used = cursor.position();
            pending.drain(..used);
            if !switched {
                break;
            }
        }

        if read == 0 {
            break;
        }
    }

    if !pending.is_empty() {
        log::debug!("{} trailing bytes left unprocessed", pending.len());
    }
    Ok(summary)
}
