mod common;

use common::{Harness, TestResult};
use pjl::{FeedStatus, ParserState, UEL, run_job_chunked};
use std::fs;

#[test]
fn test_unknown_command_fails_only_its_line() {
    let mut h = Harness::new();
    let status = h.feed(b"@PJL COMMENT whatever\n@PJL SET COPIES=3\n");
    assert_eq!(status, FeedStatus::NeedMoreInput);
    assert_eq!(h.env("copies"), Some("3"));
}

#[test]
fn test_download_then_back_to_lines() -> TestResult {
    let mut h = Harness::new();
    let payload: Vec<u8> = (0..1024u32).map(|i| (i % 256) as u8).collect();
    let mut job = br#"@PJL FSDOWNLOAD FORMAT:BINARY NAME="0:\myfont" SIZE=1024"#.to_vec();
    job.push(b'\n');
    job.extend_from_slice(&payload);
    job.extend_from_slice(b"@PJL SET COPIES=2\n");

    assert_eq!(h.feed_in_chunks(&job, 100), FeedStatus::NeedMoreInput);
    assert!(h.unconsumed().is_empty());

    let written = fs::read(h.volume(0).join("myfont"))?;
    assert_eq!(written.len(), 1024);
    assert_eq!(written, payload);
    assert_eq!(h.env("copies"), Some("2"));
    assert!(!h.pjl.sandbox().is_writing());
    Ok(())
}

#[test]
fn test_uel_split_across_two_feeds() {
    let mut job = UEL.to_vec();
    job.extend_from_slice(b"@PJL SET DUPLEX=ON\n");

    for split in 1..job.len() {
        let mut h = Harness::new();
        h.feed(&job[..split]);
        assert_eq!(h.feed(&job[split..]), FeedStatus::NeedMoreInput);
        assert!(h.unconsumed().is_empty(), "split at {}", split);
        assert_eq!(h.env("duplex"), Some("ON"), "split at {}", split);
    }
}

#[test]
fn test_leading_crlf_is_tolerated_once() {
    let mut h = Harness::new();
    assert_eq!(h.feed(b"\r\n@PJL SET COPIES=5\n"), FeedStatus::NeedMoreInput);
    assert_eq!(h.env("copies"), Some("5"));

    let mut h = Harness::new();
    assert_eq!(h.feed(b"\r\n\r\n@PJL SET COPIES=5\n"), FeedStatus::NotPjl);
    assert_eq!(h.unconsumed(), b"\r\n\r\n@PJL SET COPIES=5\n");
    assert_eq!(h.env("copies"), Some("1"));
}

#[test]
fn test_keywords_are_case_and_spacing_insensitive() {
    let mut h = Harness::new();
    h.feed(b"@pjl   set\tcopies = 4\n@PjL DeFaUlT PaPeR=legal\n");
    assert_eq!(h.env("copies"), Some("4"));
    assert_eq!(h.defvar("paper"), Some("legal"));
}

#[test]
fn test_gsset_lines_reach_the_param_sink() {
    let mut h = Harness::new();
    h.feed(b"@PJL GSSET MaxBitmap=1000000\n@PJL GSSETSTRING OutputFile=\"x.pdf\"\n");
    let recorded = h.params.recorded();
    assert_eq!(recorded.len(), 2);
    assert_eq!(recorded[0].to_string(), "MaxBitmap=1000000");
    assert_eq!(recorded[1].to_string(), "OutputFile=\"x.pdf\"");
}

#[test]
fn test_run_job_skips_pdl_between_uels() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = pjl::ParserConfig {
        volumes: pjl::Volumes::new(
            dir.path().join("v0").to_string_lossy(),
            dir.path().join("v1").to_string_lossy(),
        ),
        font_root: dir.path().to_path_buf(),
        ..pjl::ParserConfig::default()
    };
    let mut pjl = ParserState::new(config);

    let pcl = b"\x1bE\x1b&l0O hello \x1b*p0x0Y".to_vec();
    let mut job = UEL.to_vec();
    job.extend_from_slice(b"@PJL SET COPIES=3\n@PJL ENTER LANGUAGE=PCL\n");
    job.extend_from_slice(&pcl);
    job.extend_from_slice(UEL);
    job.extend_from_slice(b"@PJL SET DUPLEX=ON\n");

    let summary = run_job_chunked(&mut pjl, job.as_slice(), 7)?;
    assert_eq!(summary.pdl_sections, 1);
    assert_eq!(summary.jobs, 1);
    assert_eq!(summary.skipped_bytes, pcl.len() as u64);
    // A new job starts from the user defaults.
    assert_eq!(pjl.get_envvar("copies"), Some("1"));
    assert_eq!(pjl.get_envvar("duplex"), Some("ON"));
    Ok(())
}
