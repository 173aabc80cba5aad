//! Progress reporting on a background thread.
//!
//! The reporter only ever reads the shared [`ProcessedCount`]; it never
//! synchronizes with the writer beyond that atomic load. Stopping is a
//! handshake: the stop signal is sent, the thread clears its line, and
//! [`ProgressReporter::stop`] returns only after the thread has exited.

use crate::models::ProcessedCount;
use crossbeam_channel::{RecvTimeoutError, Sender, bounded};
use std::io::{self, Stdout, Write};
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const SPINNER_GLYPHS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Somewhere progress can be drawn.
pub trait ProgressDisplay: Send {
    /// Draw the current state, replacing whatever was drawn before.
    fn render(&mut self, glyph: char, processed: u64);

    /// Erase the progress line. Called once, after the last render.
    fn clear(&mut self);
}

impl<D: ProgressDisplay + ?Sized> ProgressDisplay for Box<D> {
    fn render(&mut self, glyph: char, processed: u64) {
        (**self).render(glyph, processed);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

/// Single-line spinner overwritten in place with a carriage return.
pub struct TerminalDisplay<W: Write + Send> {
    out: W,
}

impl TerminalDisplay<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ProgressDisplay for TerminalDisplay<W> {
    // Rendering failures are ignored: progress never affects the scan.
    fn render(&mut self, glyph: char, processed: u64) {
        let _ = write!(self.out, "\r{glyph} Scanning... {processed} files found");
        let _ = self.out.flush();
    }

    fn clear(&mut self) {
        let _ = write!(self.out, "\r\x1b[K");
        let _ = self.out.flush();
    }
}

/// Handle to a running reporter thread.
pub struct ProgressReporter {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    /// Spawn the reporter, rendering every `tick` until stopped.
    pub fn start<D>(mut display: D, processed: ProcessedCount, tick: Duration) -> io::Result<Self>
    where
        D: ProgressDisplay + 'static,
    {
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name("progress".to_string())
            .spawn(move || {
                let mut frame = 0usize;
                loop {
                    let glyph = SPINNER_GLYPHS[frame % SPINNER_GLYPHS.len()];
                    display.render(glyph, processed.get());
                    frame = frame.wrapping_add(1);

                    match stop_rx.recv_timeout(tick) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                display.clear();
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait until it has cleared its line and exited.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("progress reporter thread panicked");
            }
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.shutdown();
    }
}
