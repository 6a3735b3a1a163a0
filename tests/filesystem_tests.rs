mod common;

use common::{FullDisk, Harness, TestResult};
use pjl::{FeedStatus, PjlError, SandboxError};
use std::fs;
use std::sync::Arc;

#[test]
fn test_download_outside_sandbox_is_rejected() {
    let mut h = Harness::new();
    for name in [r#""2:\evil""#, r#""0:\..\evil""#, r#""C:\evil""#] {
        let line = format!("@PJL FSDOWNLOAD NAME={} SIZE=4", name);
        let err = h.pjl.execute_line(line.as_bytes()).unwrap_err();
        assert!(
            matches!(err, PjlError::Sandbox(SandboxError::IllegalPath(_))),
            "{}: {}",
            name,
            err
        );
    }
    assert!(!h.dir.path().join("evil").exists());
    assert!(!h.pjl.sandbox().is_writing());
}

#[test]
fn test_second_download_does_not_disturb_the_first() -> TestResult {
    let mut h = Harness::new();
    h.feed(b"@PJL FSDOWNLOAD NAME=\"0:\\first\" SIZE=8\nabc");
    assert_eq!(h.pjl.sandbox().remaining(), 5);

    let err = h
        .pjl
        .execute_line(br#"@PJL FSDOWNLOAD NAME="0:\second" SIZE=2"#)
        .unwrap_err();
    assert!(matches!(err, PjlError::Sandbox(SandboxError::WriteInFlight)));
    assert_eq!(h.pjl.sandbox().remaining(), 5);

    h.feed(b"defgh");
    assert_eq!(fs::read(h.volume(0).join("first"))?, b"abcdefgh");
    assert!(!h.volume(0).join("second").exists());
    Ok(())
}

#[test]
fn test_resources_written_by_download_can_be_read_back() -> TestResult {
    let mut h = Harness::new();
    assert_eq!(h.pjl.resource_size("logo.pcl"), 0);

    let body = b"\x1b*r0F\x1b*b3W\x00\xff\x00";
    let mut job = b"@PJL FSMKDIR NAME=\"1:\\macros\"\n".to_vec();
    job.extend_from_slice(
        format!("@PJL FSDOWNLOAD NAME=\"1:\\macros\\logo.pcl\" SIZE={}\n", body.len()).as_bytes(),
    );
    job.extend_from_slice(body);
    h.feed(&job);

    assert_eq!(h.pjl.resource_size("logo.pcl"), body.len() as u64);
    let mut out = Vec::new();
    assert_eq!(h.pjl.read_resource("logo.pcl", &mut out)?, body.len());
    assert_eq!(out, body);

    let mut missing = Vec::new();
    assert_eq!(h.pjl.read_resource("absent", &mut missing)?, 0);
    assert!(missing.is_empty());
    Ok(())
}

#[test]
fn test_append_extends_the_file() -> TestResult {
    let mut h = Harness::new();
    h.feed(b"@PJL FSDOWNLOAD NAME=\"0:\\log\" SIZE=3\nabc");
    h.feed(b"@PJL FSAPPEND FORMAT:BINARY NAME=\"0:\\log\" SIZE=2\nde");
    assert_eq!(fs::read(h.volume(0).join("log"))?, b"abcde");

    h.feed(b"@PJL FSDOWNLOAD NAME=\"0:\\log\" SIZE=1\nz");
    assert_eq!(fs::read(h.volume(0).join("log"))?, b"z");
    Ok(())
}

#[test]
fn test_zero_size_download_creates_empty_file() -> TestResult {
    let mut h = Harness::new();
    assert_eq!(
        h.feed(b"@PJL FSDOWNLOAD NAME=\"0:\\empty\" SIZE=0\n@PJL SET COPIES=2\n"),
        FeedStatus::NeedMoreInput
    );
    assert_eq!(fs::read(h.volume(0).join("empty"))?.len(), 0);
    assert_eq!(h.env("copies"), Some("2"));
    Ok(())
}

#[test]
fn test_directory_commands() -> TestResult {
    let mut h = Harness::new();
    fs::remove_dir(h.volume(1))?;
    h.feed(b"@PJL FSINIT VOLUME=\"1:\"\n");
    assert!(h.volume(1).is_dir());
    h.feed(b"@PJL FSINIT VOLUME=\"1:\"\n@PJL FSMKDIR NAME=\"1:\\pcl\"\n");
    assert!(h.volume(1).join("pcl").is_dir());

    fs::write(h.volume(1).join("pcl").join("b"), b"")?;
    fs::write(h.volume(1).join("pcl").join("a"), b"")?;
    let listing = h
        .pjl
        .execute_line(br#"@PJL FSDIRLIST NAME="1:\pcl" ENTRY=1 COUNT=99"#)?;
    assert_eq!(listing, pjl::Response::DirList(vec!["a".into(), "b".into()]));

    h.feed(b"@PJL FSDELETE NAME=\"1:\\pcl\\a\"\n");
    assert!(!h.volume(1).join("pcl").join("a").exists());
    Ok(())
}

#[test]
fn test_disklock_blocks_every_file_command() {
    let mut h = Harness::new();
    h.feed(b"@PJL SET DISKLOCK=on\n");
    for line in [
        r#"@PJL FSMKDIR NAME="0:\d""#,
        r#"@PJL FSDOWNLOAD NAME="0:\f" SIZE=1"#,
        r#"@PJL FSDELETE NAME="0:\f""#,
        r#"@PJL FSDIRLIST NAME="0:" ENTRY=1 COUNT=1"#,
    ] {
        let err = h.pjl.execute_line(line.as_bytes()).unwrap_err();
        assert!(matches!(err, PjlError::Sandbox(SandboxError::DiskLocked)), "{}", line);
    }
    assert!(!h.volume(0).join("d").exists());
}

#[test]
fn test_failed_host_write_aborts_download() -> TestResult {
    let mut h = Harness::with_filesystem(Arc::new(FullDisk::default()));
    let err = h
        .try_feed(b"@PJL FSDOWNLOAD NAME=\"0:\\f\" SIZE=4\nabcd")
        .unwrap_err();
    assert!(
        matches!(err, PjlError::Sandbox(SandboxError::ShortWrite { .. })),
        "{}",
        err
    );
    assert!(!h.pjl.sandbox().is_writing());
    assert_eq!(h.pjl.sandbox().remaining(), 0);

    // The dead download no longer blocks a new one.
    h.pjl.execute_line(br#"@PJL FSDOWNLOAD NAME="0:\g" SIZE=2"#)?;
    assert!(h.pjl.sandbox().is_writing());
    assert_eq!(h.pjl.sandbox().remaining(), 2);
    Ok(())
}

#[test]
fn test_oversized_download_length_is_not_armed() {
    let mut h = Harness::new();
    let status = h.feed(b"@PJL FSDOWNLOAD NAME=\"0:\\big\" SIZE=99999999999999999999\nabcd");
    assert_eq!(status, FeedStatus::NotPjl);
    assert!(!h.pjl.sandbox().is_writing());
    assert!(!h.volume(0).join("big").exists());
    assert_eq!(h.unconsumed(), b"abcd");
}
