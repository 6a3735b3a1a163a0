use pjl::{
    DirEntry, FeedStatus, HostFile, HostFilesystem, OpenMode, ParserBuilder, ParserConfig,
    ParserState, PjlError, ReadCursor, RecordingParamSink, StdFilesystem, Volumes,
};
use std::fs;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Route `log` output through the test harness when `RUST_LOG` is set.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A parser wired to two fresh sandbox volumes and a private font root,
/// fed the way a stream reader would feed it.
pub struct Harness {
    pub dir: TempDir,
    pub pjl: ParserState,
    pub params: RecordingParamSink,
    pending: Vec<u8>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_font_dirs(&[])
    }

    /// Creates each directory under the font root with one font file in it
    /// before the parser is built, so the matching sources probe as populated.
    pub fn with_font_dirs(font_dirs: &[&str]) -> Self {
        Self::build(font_dirs, Arc::new(StdFilesystem::new()))
    }

    /// A harness whose parser reaches the host through `filesystem`.
    pub fn with_filesystem(filesystem: Arc<dyn HostFilesystem>) -> Self {
        Self::build(&[], filesystem)
    }

    fn build(font_dirs: &[&str], filesystem: Arc<dyn HostFilesystem>) -> Self {
        init_logging();
        let dir = tempfile::tempdir().expect("tempdir");
        let font_root = dir.path().join("fonts");
        fs::create_dir(&font_root).expect("font root");
        for font_dir in font_dirs {
            let path = font_root.join(font_dir);
            fs::create_dir_all(&path).expect("font dir");
            fs::write(path.join("font.sfp"), b"\x1b)s64W").expect("font file");
        }
        for volume in ["v0", "v1"] {
            fs::create_dir(dir.path().join(volume)).expect("volume");
        }

        let config = ParserConfig {
            volumes: Volumes::new(
                dir.path().join("v0").to_string_lossy(),
                dir.path().join("v1").to_string_lossy(),
            ),
            font_root,
            ..ParserConfig::default()
        };
        let params = RecordingParamSink::new();
        let pjl = ParserBuilder::new()
            .with_config(config)
            .with_param_sink(Arc::new(params.clone()))
            .with_filesystem(filesystem)
            .build();

        Self {
            dir,
            pjl,
            params,
            pending: Vec::new(),
        }
    }

    /// Host directory backing volume `0:` or `1:`.
    pub fn volume(&self, n: u8) -> PathBuf {
        self.dir.path().join(format!("v{}", n))
    }

    /// Feeds `bytes` after whatever an earlier call left unconsumed.
    pub fn feed(&mut self, bytes: &[u8]) -> FeedStatus {
        self.try_feed(bytes).expect("feed")
    }

    /// Like [`Self::feed`], but hands back errors from the parser.
    pub fn try_feed(&mut self, bytes: &[u8]) -> Result<FeedStatus, PjlError> {
        self.pending.extend_from_slice(bytes);
        let mut cursor = ReadCursor::new(&self.pending);
        let result = self.pjl.feed(&mut cursor);
        let used = cursor.position();
        self.pending.drain(..used);
        result
    }

    pub fn feed_in_chunks(&mut self, bytes: &[u8], chunk: usize) -> FeedStatus {
        let mut status = FeedStatus::NeedMoreInput;
        for piece in bytes.chunks(chunk) {
            status = self.feed(piece);
            if status == FeedStatus::NotPjl {
                break;
            }
        }
        status
    }

    /// Bytes the parser has not consumed yet.
    pub fn unconsumed(&self) -> &[u8] {
        &self.pending
    }

    pub fn env(&self, name: &str) -> Option<&str> {
        self.pjl.get_envvar(name)
    }

    pub fn defvar(&self, name: &str) -> Option<&str> {
        self.pjl.get_defvar(name)
    }
}

/// A host filesystem whose files accept no writes, as on a full disk.
/// Everything else goes to `std::fs`.
#[derive(Debug, Default)]
pub struct FullDisk {
    inner: StdFilesystem,
}

#[derive(Debug)]
struct FullFile;

impl Read for FullFile {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }
}

impl Write for FullFile {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::StorageFull, "no space left on device"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FullFile {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Ok(0)
    }
}

impl HostFilesystem for FullDisk {
    fn open(&self, path: &Path, mode: OpenMode) -> io::Result<Box<dyn HostFile>> {
        match mode {
            OpenMode::Read => self.inner.open(path, mode),
            OpenMode::Truncate | OpenMode::Append => Ok(Box::new(FullFile)),
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        self.inner.read_dir(path)
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        self.inner.create_dir(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        self.inner.remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn name(&self) -> &'static str {
        "FullDisk"
    }
}
