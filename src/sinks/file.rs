//! File sink implementation.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::core::error::{LogError, Result};
use crate::core::level::Level;
use crate::core::sink::Sink;

/// Sink that appends one record per line to a file.
///
/// Writes are buffered; [`Sink::flush`] drains the buffer and syncs file
/// data to disk. The file is opened in append mode so restarts keep
/// existing records.
pub struct FileSink {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    /// Path this sink writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, _level: Level, record: &str) -> Result<()> {
        let mut writer = self.writer.lock();
        writer
            .write_all(record.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .map_err(|e| LogError::sink_write(self.name(), e))
    }

    fn flush(&self) -> Result<()> {
        let mut writer = self.writer.lock();
        writer
            .flush()
            .and_then(|()| writer.get_ref().sync_data())
            .map_err(|e| LogError::sink_flush(self.name(), e))
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        let _ = self.writer.lock().flush();
    }
}
