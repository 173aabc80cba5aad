//! CLI argument parsing

use crate::services::batch::DEFAULT_BATCH_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan(ScanArgs),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanArgs {
    pub path: String,
    pub batch_size: usize,
    pub quiet: bool,
    pub sort: bool,
}

impl Default for ScanArgs {
    fn default() -> Self {
        Self {
            path: String::new(),
            batch_size: DEFAULT_BATCH_SIZE,
            quiet: false,
            sort: false,
        }
    }
}

/// One-line usage text for `program`.
#[must_use]
pub fn usage(program: &str) -> String {
    format!("Usage: {program} <directory> [batch_size]")
}

/// Parse a batch size, accepting only positive integers.
pub fn parse_batch_size(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err("Error: batch_size must be a positive integer".to_string()),
    }
}

/// Parse command line arguments
///
/// `args[0]` is the program name. Errors are complete messages ready for
/// standard error.
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let program = args.first().map_or("pathscan", String::as_str);
    let mut scan_args = ScanArgs::default();
    let mut path_seen = false;
    let mut batch_seen = false;

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-v" => return Ok(Command::Version),
            "--quiet" | "-q" => scan_args.quiet = true,
            "--sort" => scan_args.sort = true,
            other if other.starts_with("--") => {
                return Err(format!("Unknown option: {other}"));
            }
            other => {
                if !path_seen {
                    scan_args.path = other.to_string();
                    path_seen = true;
                } else if !batch_seen {
                    scan_args.batch_size = parse_batch_size(other)?;
                    batch_seen = true;
                } else {
                    return Err(format!("Unexpected argument: {other}"));
                }
            }
        }
    }

    if !path_seen {
        return Err(usage(program));
    }

    Ok(Command::Scan(scan_args))
}
