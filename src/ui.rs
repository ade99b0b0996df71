//! Console output helpers.
//!
//! Plain results go to stdout; errors and warnings go to stderr.

use console::style;

use crate::bump::BumpReport;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("WARNING:").yellow(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Unstyled `<old> --> <new>` line, so scripts can parse it
pub fn display_bump(report: &BumpReport) {
    println!("{}", report);
}
