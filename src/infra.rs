//! Infrastructure traits for abstracting I/O operations.
//!
//! Log comparison and config loading go through [`FileSystem`] so that they can
//! be exercised against in-memory inputs in tests.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

/// Trait for abstracting filesystem operations.
pub trait FileSystem {
    /// Buffered reader returned by [`FileSystem::open`].
    type Reader: BufRead;

    /// Open a file for line-by-line reading.
    fn open(&self, path: &Path) -> io::Result<Self::Reader>;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    type Reader = BufReader<File>;

    fn open(&self, path: &Path) -> io::Result<Self::Reader> {
        File::open(path).map(BufReader::new)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// In-memory filesystem keyed by path.
///
/// Files that were never added report [`io::ErrorKind::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: Vec<(PathBuf, String)>,
}

impl MemoryFileSystem {
    /// Create an empty in-memory filesystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let path = path.into();
        let contents = contents.into();
        match self.files.iter_mut().find(|(p, _)| *p == path) {
            Some(entry) => entry.1 = contents,
            None => self.files.push((path, contents)),
        }
        self
    }

    fn lookup(&self, path: &Path) -> io::Result<&str> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, contents)| contents.as_str())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("{} not found", path.display()),
                )
            })
    }
}

impl FileSystem for MemoryFileSystem {
    type Reader = Cursor<Vec<u8>>;

    fn open(&self, path: &Path) -> io::Result<Self::Reader> {
        self.lookup(path)
            .map(|contents| Cursor::new(contents.as_bytes().to_vec()))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.lookup(path).map(str::to_string)
    }
}

/// Line iterator that accepts `\n`, `\r\n` and a lone `\r` as line endings.
///
/// Endings are stripped. Lines that are not valid UTF-8 yield
/// [`io::ErrorKind::InvalidData`].
#[derive(Debug)]
pub struct LogLines<R> {
    reader: R,
    buf: Vec<u8>,
    pending: VecDeque<String>,
}

impl<R: BufRead> LogLines<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    fn fill(&mut self) -> io::Result<bool> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }

        let chunk = std::str::from_utf8(&self.buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let chunk = chunk.strip_suffix('\n').unwrap_or(chunk);
        let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);
        self.pending.extend(chunk.split('\r').map(str::to_string));
        Ok(true)
    }
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.is_empty() {
            match self.fill() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
        self.pending.pop_front().map(Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_real_filesystem_open_reads_lines() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("run.log");
        std::fs::write(&file_path, "first\nsecond\n").unwrap();

        let reader = RealFileSystem.open(&file_path).unwrap();
        let lines: Vec<String> = reader.lines().collect::<Result<_, _>>().unwrap();
        assert_eq!(lines, vec!["first", "second"]);
    }

    #[test]
    fn test_real_filesystem_read_to_string() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        std::fs::write(&file_path, "Hello, World!").unwrap();

        let read_content = RealFileSystem.read_to_string(&file_path).unwrap();
        assert_eq!(read_content, "Hello, World!");
    }

    #[test]
    fn test_real_filesystem_open_nonexistent_file_returns_not_found() {
        let err = RealFileSystem
            .open(Path::new("/nonexistent/file.log"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_memory_filesystem_serves_added_files() {
        let fs = MemoryFileSystem::new().with_file("a.log", "line\n");

        let mut buf = String::new();
        fs.open(Path::new("a.log"))
            .unwrap()
            .read_to_string(&mut buf)
            .unwrap();
        assert_eq!(buf, "line\n");
        assert_eq!(fs.read_to_string(Path::new("a.log")).unwrap(), "line\n");
    }

    #[test]
    fn test_memory_filesystem_replaces_existing_file() {
        let fs = MemoryFileSystem::new()
            .with_file("a.log", "old")
            .with_file("a.log", "new");
        assert_eq!(fs.read_to_string(Path::new("a.log")).unwrap(), "new");
    }

    fn log_lines(input: &[u8]) -> Vec<String> {
        LogLines::new(Cursor::new(input.to_vec()))
            .collect::<io::Result<_>>()
            .unwrap()
    }

    #[test]
    fn test_log_lines_accepts_all_line_endings() {
        assert_eq!(log_lines(b"a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(log_lines(b"a\rb\r"), vec!["a", "b"]);
        assert_eq!(log_lines(b"\r\r\n\n"), vec!["", "", ""]);
    }

    #[test]
    fn test_log_lines_empty_input_yields_nothing() {
        assert!(log_lines(b"").is_empty());
        assert_eq!(log_lines(b"\n"), vec![""]);
    }

    #[test]
    fn test_log_lines_invalid_utf8_is_invalid_data() {
        let err = LogLines::new(Cursor::new(vec![0xff, b'\n']))
            .next()
            .unwrap()
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_memory_filesystem_missing_file_returns_not_found() {
        let fs = MemoryFileSystem::new();
        let err = fs.open(Path::new("missing.log")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
