//! Data models for discovered files, write batches, and the shared progress counter

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Header row written at the top of every CSV output.
pub const CSV_HEADER: [&str; 2] = ["file_path", "path_length"];

/// One row of output: a discovered path and the length of its string form.
///
/// `path_length` is derived from `path` at construction and counts UTF-8 code
/// units (bytes), so it always matches the emitted field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    #[serde(rename = "file_path")]
    path: String,
    path_length: usize,
}

impl FileRecord {
    #[must_use]
    pub fn new(path: String) -> Self {
        let path_length = path.len();
        Self { path, path_length }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn path_length(&self) -> usize {
        self.path_length
    }
}

/// Records accumulated between two flushes, bounded by `capacity`.
#[derive(Debug)]
pub struct Batch {
    records: Vec<FileRecord>,
    capacity: usize,
}

impl Batch {
    /// Create an empty batch. A capacity of zero is treated as one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, record: FileRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Drop the flushed records while keeping the allocation.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Running count of records durably written.
///
/// Single writer (the batch writer), any number of lock-free readers. Cloning
/// shares the underlying counter.
#[derive(Debug, Clone, Default)]
pub struct ProcessedCount(Arc<AtomicU64>);

impl ProcessedCount {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a flushed batch. Only called after the sink has flushed.
    pub fn add(&self, records: u64) {
        self.0.fetch_add(records, Ordering::Release);
    }

    #[must_use]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }
}
