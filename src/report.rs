//! Console reporting for a relabel run.
//!
//! This module is separate from the pipeline logic so sfvset can be used as
//! a library without printing side effects. The output is informational and
//! never machine-parsed; colors turn themselves off when stdout is piped.

use std::path::Path;

use colored::Colorize;

use crate::transform::RunStats;

/// Success mark for consistent output formatting
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
/// Warning mark for consistent output formatting
pub const WARNING_MARK: &str = "\u{26a0}"; // ⚠

pub fn mapping_loaded(count: usize) {
    println!("Loaded {} replacement entries", count.to_string().bold());
}

pub fn stats(stats: &RunStats) {
    println!("Found {} customValue elements", stats.found.to_string().bold());
    println!("{} Replaced: {}", SUCCESS_MARK.green(), stats.replaced);
    println!("{} Not found: {}", WARNING_MARK.yellow(), stats.not_found);
}

pub fn dry_run() {
    println!("{}", "Dry run: no file was written".dimmed());
}

pub fn written(path: &Path) {
    println!("Wrote {}", path.display().to_string().cyan());
}
