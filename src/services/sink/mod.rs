//! Output sinks receiving flushed batches of file records.

use crate::models::FileRecord;
use std::io;

/// Trait implemented by destinations that receive serialized batches.
pub trait RecordSink: Send {
    /// Write one batch and flush it, so that once this returns `Ok` the
    /// records are handed to the underlying storage.
    fn write_batch(&mut self, records: &[FileRecord]) -> io::Result<()>;

    /// Finalize the sink once the last batch has been written.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub mod csv;
pub mod memory;

pub use self::csv::CsvSink;
pub use self::memory::MemorySink;
