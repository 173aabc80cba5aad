//! Streaming CSV sink writing one row per record, flushed after every batch.

use super::RecordSink;
use crate::models::{CSV_HEADER, FileRecord};
use crate::{Error, OutputStage};
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Sink that owns the CSV output stream.
pub struct CsvSink<W: Write> {
    writer: Writer<W>,
    target: PathBuf,
}

impl CsvSink<File> {
    /// Create (or truncate) the file at `path` and write the header row.
    pub fn create<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path_ref = path.as_ref();
        let file = File::create(path_ref).map_err(|source| Error::Output {
            stage: OutputStage::Create,
            source,
        })?;

        let mut sink = Self::from_writer(file);
        sink.target = path_ref.to_path_buf();
        sink.write_header().map_err(|source| Error::Output {
            stage: OutputStage::Header,
            source,
        })?;
        Ok(sink)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap an arbitrary writer. The header is not written yet.
    pub fn from_writer(inner: W) -> Self {
        let writer = WriterBuilder::new().has_headers(false).from_writer(inner);
        Self {
            writer,
            target: PathBuf::new(),
        }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        self.writer.write_record(CSV_HEADER)?;
        self.writer.flush()
    }

    /// Path of the file backing this sink, empty for arbitrary writers.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> io::Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

impl<W: Write + Send> RecordSink for CsvSink<W> {
    fn write_batch(&mut self, records: &[FileRecord]) -> io::Result<()> {
        for record in records {
            self.writer.serialize(record)?;
        }
        self.writer.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
