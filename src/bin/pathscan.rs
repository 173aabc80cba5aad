//! pathscan - Main binary entry point

use pathscan::cli::args::{Command, ScanArgs, parse_args};
use pathscan::cli::output::print_summary;
use pathscan::{ProgressMode, ScanOptions};
use std::process;

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug pathscan /path
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    let command = match parse_args(&args) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            process::exit(1);
        }
    };

    let exit_code = match command {
        Command::Help => {
            print_help();
            0
        }
        Command::Version => {
            print_version();
            0
        }
        Command::Scan(scan_args) => handle_scan(&scan_args),
    };

    process::exit(exit_code);
}

fn handle_scan(args: &ScanArgs) -> i32 {
    let opts = ScanOptions {
        batch_size: args.batch_size,
        progress: if args.quiet {
            ProgressMode::Never
        } else {
            ProgressMode::Auto
        },
        sort_entries: args.sort,
        ..ScanOptions::default()
    };

    match pathscan::scan_to_csv(&args.path, &opts) {
        Ok(summary) => {
            log::info!(
                "scanned {} in {:.2?}",
                summary.root,
                summary.elapsed()
            );
            print_summary(&summary);
            0
        }
        Err(e) => {
            if let pathscan::Error::Traversal { processed, .. } = &e {
                log::warn!("output is incomplete: {processed} records were written");
            }
            eprintln!("{e}");
            1
        }
    }
}

fn print_help() {
    println!("pathscan - List every file under a directory into a CSV file");
    println!();
    println!("USAGE:");
    println!("    pathscan <DIRECTORY> [BATCH_SIZE] [OPTIONS]");
    println!();
    println!("ARGUMENTS:");
    println!("    <DIRECTORY>               Directory to scan recursively");
    println!("    [BATCH_SIZE]              Rows written per flush (default: 100)");
    println!();
    println!("OPTIONS:");
    println!("    -q, --quiet               Do not draw the progress spinner");
    println!("    --sort                    Visit directory entries in file-name order");
    println!("    -h, --help                Show this help message");
    println!("    -v, --version             Show version information");
    println!();
    println!("OUTPUT:");
    println!("    file_paths.csv in the current directory, with columns");
    println!("    file_path,path_length and one row per file in discovery order.");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_DATE: &str = env!("GIT_DATE");
    const BUILD_TARGET: &str = env!("BUILD_TARGET");

    println!("pathscan {VERSION}");
    println!("Commit: {GIT_HASH} ({GIT_DATE})");
    println!("Target: {BUILD_TARGET}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
