//! Size-rotated log file writer
//!
//! Files are `<name>.log` (active), `<name>.log.1` (newest rotated) up to
//! `<name>.log.<max_files - 1>` (oldest).

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

struct RollingState {
    dir: PathBuf,
    base: String,
    max_bytes: u64,
    max_files: usize,
    file: File,
    size: u64,
}

impl RollingState {
    fn path_for(&self, index: usize) -> PathBuf {
        if index == 0 {
            self.dir.join(&self.base)
        } else {
            self.dir.join(format!("{}.{}", self.base, index))
        }
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let keep = self.max_files.max(1);
        let oldest = self.path_for(keep - 1);
        if keep > 1 && oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for index in (1..keep.saturating_sub(1) + 1).rev() {
            let from = self.path_for(index - 1);
            if from.exists() {
                fs::rename(&from, self.path_for(index))?;
            }
        }
        // A single kept file is truncated in place
        self.file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path_for(0))?;
        self.size = 0;
        Ok(())
    }
}

/// `io::Write` sink that rotates by size
#[derive(Clone)]
pub struct RollingWriter {
    state: Arc<Mutex<RollingState>>,
}

impl RollingWriter {
    pub fn open(
        dir: &Path,
        app_name: &str,
        max_bytes: u64,
        max_files: usize,
    ) -> io::Result<Self> {
        let base = format!("{app_name}.log");
        let path = dir.join(&base);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let size = file.metadata()?.len();
        Ok(Self {
            state: Arc::new(Mutex::new(RollingState {
                dir: dir.to_path_buf(),
                base,
                max_bytes,
                max_files,
                file,
                size,
            })),
        })
    }

    pub fn active_path(&self) -> PathBuf {
        match self.state.lock() {
            Ok(state) => state.path_for(0),
            Err(poisoned) => poisoned.into_inner().path_for(0),
        }
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        if state.size > 0 && state.size + buf.len() as u64 > state.max_bytes {
            state.rotate()?;
        }
        state.file.write_all(buf)?;
        state.size += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log writer poisoned"))?;
        state.file.flush()
    }
}

impl<'a> MakeWriter<'a> for RollingWriter {
    type Writer = RollingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_logs(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with("app.log"))
            .count()
    }

    #[test]
    fn test_writes_to_active_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::open(dir.path(), "app", 1024, 3).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        let content = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert_eq!(content, "hello\n");
    }

    #[test]
    fn test_rotates_past_size_cap() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::open(dir.path(), "app", 10, 3).unwrap();
        writer.write_all(b"first line\n").unwrap();
        writer.write_all(b"second line\n").unwrap();
        writer.flush().unwrap();

        let rotated = fs::read_to_string(dir.path().join("app.log.1")).unwrap();
        let active = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert_eq!(rotated, "first line\n");
        assert_eq!(active, "second line\n");
    }

    #[test]
    fn test_keeps_at_most_max_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = RollingWriter::open(dir.path(), "app", 4, 3).unwrap();
        for i in 0..10 {
            writer.write_all(format!("line {i}\n").as_bytes()).unwrap();
        }
        writer.flush().unwrap();

        assert_eq!(count_logs(dir.path()), 3);
        let active = fs::read_to_string(dir.path().join("app.log")).unwrap();
        assert_eq!(active, "line 9\n");
        let oldest = fs::read_to_string(dir.path().join("app.log.2")).unwrap();
        assert_eq!(oldest, "line 7\n");
    }
}
