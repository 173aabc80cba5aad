//! Startup and shutdown ordering for the scan pipeline.
//!
//! The coordinator validates the root, opens the output, then runs three
//! units concurrently:
//!
//! - the traverser on its own thread, pushing into the path queue
//! - the progress reporter on its own thread, reading the processed count
//! - the batch writer on the calling thread, draining the queue
//!
//! Once the queue is closed and drained the final batch is flushed, the
//! reporter is stopped and joined, and only then is the traversal outcome
//! inspected so that the final report never interleaves with the spinner.

use super::batch::BatchWriter;
use super::progress::{ProgressDisplay, ProgressReporter, TerminalDisplay};
use super::queue::path_channel;
use super::sink::{CsvSink, RecordSink};
use super::traverse::{TraversalStop, Traverser};
use crate::models::ProcessedCount;
use crate::{Error, OutputStage, ProgressMode, Result, ScanOptions, Summary};
use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::thread;
use std::time::SystemTime;

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Running,
    Draining,
    Reporting,
    Succeeded,
    Failed,
}

impl Phase {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Validating => "validating",
            Phase::Running => "running",
            Phase::Draining => "draining",
            Phase::Reporting => "reporting",
            Phase::Succeeded => "succeeded",
            Phase::Failed => "failed",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check that `root` exists and is a directory.
pub fn validate_root(root: &Path) -> Result<()> {
    let metadata = fs::metadata(root).map_err(|source| Error::Access {
        path: root.display().to_string(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(Error::NotADirectory(root.display().to_string()));
    }

    Ok(())
}

pub struct Coordinator {
    options: ScanOptions,
    display: Option<Box<dyn ProgressDisplay>>,
    phase: Phase,
}

impl Coordinator {
    /// Construct a coordinator; the progress display is chosen from
    /// `options.progress`.
    #[must_use]
    pub fn new(options: ScanOptions) -> Self {
        let show = match options.progress {
            ProgressMode::Always => true,
            ProgressMode::Never => false,
            ProgressMode::Auto => std::io::stdout().is_terminal(),
        };
        let display: Option<Box<dyn ProgressDisplay>> = if show {
            Some(Box::new(TerminalDisplay::stdout()))
        } else {
            None
        };

        Self {
            options,
            display,
            phase: Phase::Idle,
        }
    }

    /// Replace the progress display, or disable it with `None`.
    #[must_use]
    pub fn with_display(mut self, display: Option<Box<dyn ProgressDisplay>>) -> Self {
        self.display = display;
        self
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Scan `root` into the CSV file named by the options.
    ///
    /// The root is validated strictly before the output file is created.
    pub fn run(&mut self, root: &Path) -> Result<Summary> {
        let started_at = SystemTime::now();
        self.validate(root)?;

        let sink = match CsvSink::create(&self.options.output_path) {
            Ok(sink) => sink,
            Err(err) => return self.fail(err),
        };
        log::info!(
            "scanning {} into {}",
            root.display(),
            sink.target().display()
        );

        let (processed, _sink) = self.pipeline(root, sink)?;

        Ok(Summary {
            root: root.to_string_lossy().to_string(),
            output_path: self.options.output_path.clone(),
            processed,
            started_at,
            finished_at: SystemTime::now(),
        })
    }

    /// Scan `root` into an arbitrary sink, returning the record count and the
    /// sink itself.
    pub fn run_with_sink<S: RecordSink>(&mut self, root: &Path, sink: S) -> Result<(u64, S)> {
        self.validate(root)?;
        self.pipeline(root, sink)
    }

    fn validate(&mut self, root: &Path) -> Result<()> {
        self.enter(Phase::Validating);
        if let Err(err) = self.options.validate().and_then(|()| validate_root(root)) {
            return self.fail(err);
        }
        Ok(())
    }

    fn pipeline<S: RecordSink>(&mut self, root: &Path, sink: S) -> Result<(u64, S)> {
        self.enter(Phase::Running);
        let processed = ProcessedCount::new();
        let (tx, rx) = path_channel(self.options.channel_capacity);

        // Dropped on every return below, which stops and joins the thread.
        let reporter = match self.display.take() {
            Some(display) => {
                match ProgressReporter::start(
                    display,
                    processed.clone(),
                    self.options.progress_interval,
                ) {
                    Ok(reporter) => Some(reporter),
                    Err(err) => {
                        return self.fail(Error::System(format!(
                            "failed to start progress reporter: {err}"
                        )));
                    }
                }
            }
            None => None,
        };

        let traverser = Traverser::new(self.options.sort_entries);
        let walk_root = root.to_path_buf();
        let walker = match thread::Builder::new()
            .name("traverse".to_string())
            .spawn(move || traverser.run(&walk_root, tx))
        {
            Ok(handle) => handle,
            Err(err) => {
                return self.fail(Error::System(format!(
                    "failed to start traversal thread: {err}"
                )));
            }
        };

        let mut writer = BatchWriter::new(sink, self.options.batch_size, processed.clone());

        // The traverser is left to notice the dropped receiver on its next push.
        if let Err(source) = writer.consume(rx) {
            return self.fail(Error::Output {
                stage: OutputStage::Batch,
                source,
            });
        }

        self.enter(Phase::Draining);
        let total = match writer.finish() {
            Ok(total) => total,
            Err(source) => {
                return self.fail(Error::Output {
                    stage: OutputStage::Finish,
                    source,
                });
            }
        };

        self.enter(Phase::Reporting);
        if let Some(reporter) = reporter {
            reporter.stop();
        }

        let outcome = match walker.join() {
            Ok(outcome) => outcome,
            Err(_) => return self.fail(Error::System("traversal thread panicked".to_string())),
        };

        match outcome {
            Ok(pushed) => {
                log::debug!("traversal pushed {pushed} paths, {total} written");
            }
            Err(TraversalStop::Walk(source)) => {
                log::warn!("traversal failed after {total} records were written: {source}");
                return self.fail(Error::Traversal {
                    processed: total,
                    source,
                });
            }
            Err(TraversalStop::ConsumerGone) => {
                return self.fail(Error::System(
                    "path consumer stopped before traversal finished".to_string(),
                ));
            }
        }

        self.enter(Phase::Succeeded);
        log::info!("scan finished: {total} records");
        Ok((total, writer.into_sink()))
    }

    fn enter(&mut self, phase: Phase) {
        log::debug!("coordinator: {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    fn fail<T>(&mut self, err: Error) -> Result<T> {
        self.enter(Phase::Failed);
        Err(err)
    }
}
