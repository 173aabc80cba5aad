//! Batch writer draining the path queue into a record sink.

use super::queue::PathReceiver;
use super::sink::RecordSink;
use crate::models::{Batch, FileRecord, ProcessedCount};
use std::io;

/// Default number of records serialized per flush.
pub const DEFAULT_BATCH_SIZE: usize = 100;

pub struct BatchWriter<S: RecordSink> {
    sink: S,
    batch: Batch,
    processed: ProcessedCount,
    flushes: u64,
}

impl<S: RecordSink> BatchWriter<S> {
    #[must_use]
    pub fn new(sink: S, batch_size: usize, processed: ProcessedCount) -> Self {
        Self {
            sink,
            batch: Batch::with_capacity(batch_size),
            processed,
            flushes: 0,
        }
    }

    /// Append one discovered path, flushing if the batch is now full.
    pub fn push(&mut self, path: String) -> io::Result<()> {
        self.batch.push(FileRecord::new(path));
        if self.batch.is_full() {
            self.flush()?;
        }
        Ok(())
    }

    /// Write and flush the current batch, then publish its size.
    ///
    /// The counter is only advanced after the sink reports success, so a
    /// reader never sees records that are not yet written.
    pub fn flush(&mut self) -> io::Result<()> {
        if self.batch.is_empty() {
            return Ok(());
        }

        self.sink.write_batch(self.batch.records())?;
        self.processed.add(self.batch.len() as u64);
        self.flushes += 1;
        log::debug!(
            "flushed batch #{} ({} records, {} total)",
            self.flushes,
            self.batch.len(),
            self.processed.get()
        );
        self.batch.clear();
        Ok(())
    }

    /// Consume paths until the queue is closed and drained. Dropping the
    /// receiver on error lets a blocked producer observe the disconnect.
    pub fn consume(&mut self, paths: PathReceiver) -> io::Result<()> {
        for path in paths {
            self.push(path)?;
        }
        Ok(())
    }

    /// Flush the final partial batch and finalize the sink.
    pub fn finish(&mut self) -> io::Result<u64> {
        self.flush()?;
        self.sink.finish()?;
        Ok(self.processed.get())
    }

    pub fn drain(&mut self, paths: PathReceiver) -> io::Result<u64> {
        self.consume(paths)?;
        self.finish()
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
