//! Path Listing Library
//!
//! This library walks a directory tree and streams the path of every file it
//! finds, together with the length of that path, into a CSV file. Traversal and
//! writing run concurrently, connected by a bounded queue so that a slow writer
//! holds back the walk instead of growing memory.

pub mod cli;
pub mod models;
pub mod services;

pub use models::{Batch, FileRecord, ProcessedCount};
pub use services::coordinator::{Coordinator, Phase};

use services::batch::DEFAULT_BATCH_SIZE;
use services::progress::DEFAULT_TICK;
use services::queue::DEFAULT_CHANNEL_CAPACITY;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use std::{fmt, io, result};

/// Name of the CSV file written by default, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "file_paths.csv";

/// Stage of output handling that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStage {
    Create,
    Header,
    Batch,
    Finish,
}

/// Custom error type for the library
#[derive(Debug)]
pub enum Error {
    /// Missing or invalid arguments.
    Usage(String),
    /// The scan root could not be inspected.
    Access { path: String, source: io::Error },
    /// The scan root exists but is not a directory.
    NotADirectory(String),
    /// The CSV output could not be created, written, or flushed.
    Output { stage: OutputStage, source: io::Error },
    /// The walk failed partway. `processed` records were already written.
    Traversal {
        processed: u64,
        source: walkdir::Error,
    },
    System(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Usage(msg) => f.write_str(msg),
            Error::Access { path, source } => write!(f, "Error accessing path: {path}: {source}"),
            Error::NotADirectory(path) => write!(f, "Error: {path} is not a directory"),
            Error::Output { stage, source } => match stage {
                OutputStage::Create => write!(f, "Error creating CSV file: {source}"),
                OutputStage::Header => write!(f, "Error writing CSV header: {source}"),
                OutputStage::Batch => write!(f, "Error writing batch: {source}"),
                OutputStage::Finish => write!(f, "Error writing final batch: {source}"),
            },
            Error::Traversal { source, .. } => write!(f, "Error walking directory: {source}"),
            Error::System(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Access { source, .. } | Error::Output { source, .. } => Some(source),
            Error::Traversal { source, .. } => Some(source),
            Error::Usage(_) | Error::NotADirectory(_) | Error::System(_) => None,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// When to draw the live progress line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressMode {
    /// Only when standard output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

/// Options for scanning a directory
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub batch_size: usize,
    pub channel_capacity: usize,
    pub output_path: PathBuf,
    pub progress: ProgressMode,
    pub progress_interval: Duration,
    /// Visit directory entries in file-name order instead of filesystem order.
    pub sort_entries: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            progress: ProgressMode::Auto,
            progress_interval: DEFAULT_TICK,
            sort_entries: false,
        }
    }
}

impl ScanOptions {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Usage(
                "Error: batch_size must be a positive integer".to_string(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(Error::Usage(
                "Error: channel capacity must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary result from a scan operation
#[derive(Debug)]
pub struct Summary {
    pub root: String,
    pub output_path: PathBuf,
    pub processed: u64,
    pub started_at: SystemTime,
    pub finished_at: SystemTime,
}

impl Summary {
    /// Wall-clock duration of the run, zero if the clock went backwards.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.finished_at
            .duration_since(self.started_at)
            .unwrap_or_default()
    }
}

/// Scan a directory and write every file path into the configured CSV file
///
/// # Arguments
/// * `root` - The root directory to scan
/// * `opts` - Scan options
///
/// # Returns
/// A Summary with the number of records written. On a traversal error the
/// records already flushed stay in the output file.
pub fn scan_to_csv<P: AsRef<Path>>(root: P, opts: &ScanOptions) -> Result<Summary> {
    Coordinator::new(opts.clone()).run(root.as_ref())
}
