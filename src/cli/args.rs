//! CLI argument definitions using clap.
//!
//! sfvset is a single-command tool: one input document, one mapping file,
//! an output directory and a dry-run switch.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Input GlobalValueSet XML file
    pub xml: PathBuf,

    /// CSV or JSON file with the label replacements
    #[arg(short, long)]
    pub replacements: PathBuf,

    /// Output directory for the converted document
    #[arg(long, default_value = "output")]
    pub out: PathBuf,

    /// Compute and report statistics without writing a file
    #[arg(long)]
    pub dry_run: bool,
}
