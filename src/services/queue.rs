//! Bounded path queue connecting the traverser to the batch writer.
//!
//! Exactly one producer and one consumer. The producer closes the queue by
//! dropping its [`PathSender`], which happens on every exit path of the
//! traversal thread including unwinding.

use crossbeam_channel::{Receiver, Sender, bounded};

/// Number of paths buffered between traversal and writing.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1_000;

/// Producer half. Not `Clone`: a second producer is not supported.
#[derive(Debug)]
pub struct PathSender {
    tx: Sender<String>,
}

/// Consumer half. Not `Clone`: a second consumer is not supported.
#[derive(Debug)]
pub struct PathReceiver {
    rx: Receiver<String>,
}

/// The consumer went away, so nothing more will be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected;

impl std::fmt::Display for Disconnected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("path consumer disconnected")
    }
}

impl std::error::Error for Disconnected {}

/// Create a queue holding at most `capacity` paths (minimum one).
#[must_use]
pub fn path_channel(capacity: usize) -> (PathSender, PathReceiver) {
    let (tx, rx) = bounded(capacity.max(1));
    (PathSender { tx }, PathReceiver { rx })
}

impl PathSender {
    /// Push a path, blocking while the queue is full.
    pub fn push(&self, path: String) -> Result<(), Disconnected> {
        self.tx.send(path).map_err(|_| Disconnected)
    }
}

impl Drop for PathSender {
    fn drop(&mut self) {
        log::debug!("path queue closed by producer");
    }
}

impl PathReceiver {
    /// Pop the next path, blocking while the queue is empty and still open.
    /// Returns `None` once the producer has closed and the queue is drained.
    pub fn pop(&self) -> Option<String> {
        self.rx.recv().ok()
    }
}

impl Iterator for PathReceiver {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.pop()
    }
}
