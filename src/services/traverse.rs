//! Depth-first directory traversal feeding the path queue.
//!
//! Every entry that is not a directory is pushed, in the order the walk visits
//! it. Symbolic links are not followed and are reported as themselves. The
//! first error reported by the walk stops traversal.

use super::queue::PathSender;
use std::path::Path;
use walkdir::WalkDir;

/// Why traversal stopped before visiting the whole tree.
#[derive(Debug)]
pub enum TraversalStop {
    /// The walk reported an error (unreadable directory, permission denied, ...).
    Walk(walkdir::Error),
    /// The consumer dropped its end of the queue.
    ConsumerGone,
}

/// Traversal settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Traverser {
    sort_entries: bool,
}

/// Render a path the way it is emitted to the output.
#[must_use]
pub fn path_to_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl Traverser {
    #[must_use]
    pub fn new(sort_entries: bool) -> Self {
        Self { sort_entries }
    }

    /// Walk `root` and push every non-directory entry into `sink`.
    ///
    /// Takes ownership of the sender so that the queue is closed on every exit
    /// path. Returns the number of paths pushed.
    pub fn run(&self, root: &Path, sink: PathSender) -> Result<u64, TraversalStop> {
        let mut walker = WalkDir::new(root).follow_links(false);
        if self.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let mut pushed = 0u64;
        for entry in walker {
            let entry = entry.map_err(TraversalStop::Walk)?;
            if entry.file_type().is_dir() {
                continue;
            }

            sink.push(path_to_string(entry.path()))
                .map_err(|_| TraversalStop::ConsumerGone)?;
            pushed += 1;
        }

        log::debug!("traversal of {} pushed {pushed} paths", root.display());
        Ok(pushed)
    }
}
