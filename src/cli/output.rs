//! Output formatting for CLI

use crate::Summary;

/// Final report lines printed after a successful scan.
#[must_use]
pub fn summary_lines(summary: &Summary) -> [String; 2] {
    [
        format!("Done! Processed {} files.", summary.processed),
        format!("CSV file created: {}", summary.output_path.display()),
    ]
}

pub fn print_summary(summary: &Summary) {
    for line in summary_lines(summary) {
        println!("{line}");
    }
}
