//! Size-capped line writer for span records.
//!
//! When the span file grows past its limit it is renamed to `<file>.1`,
//! replacing any previous backup, and a fresh file is started. Disk use is
//! bounded by roughly twice the limit.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::Mutex;

/// Size at which the span file is rotated (5 MB).
const DEFAULT_LIMIT_BYTES: u64 = 5 * 1024 * 1024;

/// Appends newline-terminated records to a file, rotating at a size limit.
///
/// The file is opened lazily on the first write, so construction never fails.
pub struct FileWriter {
    file_path: PathBuf,
    limit_bytes: u64,
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limit(file_path, DEFAULT_LIMIT_BYTES)
    }

    pub const fn with_limit(file_path: PathBuf, limit_bytes: u64) -> Self {
        Self {
            file_path,
            limit_bytes,
            writer: Mutex::new(None),
        }
    }

    /// Path of the single retained backup.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.file_path.as_os_str());
        name.push(".1");
        PathBuf::from(name)
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if rotating, opening or writing fails,
    /// or if the lock was poisoned by a panicking writer.
    pub fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| std::io::Error::new(ErrorKind::Other, format!("span writer lock poisoned: {e}")))?;

        self.rotate_if_full(&mut writer)?;

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| std::io::Error::new(ErrorKind::Other, "span file not open"))?;

        writeln!(file, "{line}")?;
        file.flush()?;
        drop(writer);

        Ok(())
    }

    fn rotate_if_full(&self, writer: &mut Option<File>) -> std::io::Result<()> {
        let Ok(metadata) = fs::metadata(&self.file_path) else {
            return Ok(());
        };
        if metadata.len() < self.limit_bytes {
            return Ok(());
        }

        *writer = None;
        fs::rename(&self.file_path, self.backup_path())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("limit_bytes", &self.limit_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn appends_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let writer = FileWriter::new(path.clone());

        writer.write_line("{\"a\":1}").unwrap();
        writer.write_line("{\"b\":2}").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn rotates_into_a_single_backup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let writer = FileWriter::with_limit(path.clone(), 8);

        writer.write_line("first---").unwrap();
        writer.write_line("second--").unwrap();
        writer.write_line("third---").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "third---\n");
        assert_eq!(fs::read_to_string(writer.backup_path()).unwrap(), "second--\n");

        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 2);
    }
}
