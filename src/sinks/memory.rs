//! In-memory sink for tests and capture.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::core::error::{LogError, Result};
use crate::core::level::Level;
use crate::core::sink::Sink;

/// Sink that keeps records in memory.
///
/// Useful for asserting on emitted records and for driving failure
/// paths: `fail_writes` makes every write return a disk-full error
/// without the record being stored.
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<String>>,
    fail_writes: AtomicBool,
    fail_flushes: AtomicBool,
}

// ENOSPC, the storage failure a full disk produces.
const DISK_FULL: i32 = 28;

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail with a disk-full error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::Relaxed);
    }

    /// Make subsequent flushes fail with a disk-full error.
    pub fn fail_flushes(&self, fail: bool) {
        self.fail_flushes.store(fail, Ordering::Relaxed);
    }

    /// Copies of the captured records.
    pub fn records(&self) -> Vec<String> {
        self.records.lock().clone()
    }

    /// Drain the captured records.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl Sink for MemorySink {
    fn write(&self, _level: Level, record: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::Relaxed) {
            return Err(LogError::sink_write(
                self.name(),
                io::Error::from_raw_os_error(DISK_FULL),
            ));
        }
        self.records.lock().push(record.to_string());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if self.fail_flushes.load(Ordering::Relaxed) {
            return Err(LogError::sink_flush(
                self.name(),
                io::Error::from_raw_os_error(DISK_FULL),
            ));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
