//! In-memory sink retaining written batches for callers that need full materialization.

use super::RecordSink;
use crate::models::FileRecord;
use std::io;

#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<FileRecord>,
    batch_sizes: Vec<usize>,
    finished: bool,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    /// Size of every batch written, in write order.
    #[must_use]
    pub fn batch_sizes(&self) -> &[usize] {
        &self.batch_sizes
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl RecordSink for MemorySink {
    fn write_batch(&mut self, records: &[FileRecord]) -> io::Result<()> {
        self.batch_sizes.push(records.len());
        self.records.extend_from_slice(records);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }
}
