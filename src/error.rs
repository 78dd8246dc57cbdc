//! The failure kinds a run can end with.
//!
//! Every error here is fatal: a run either completes or aborts on the first
//! one. The only conditions that are silently skipped instead of raised are
//! CSV rows with an empty field and `customValue` entries whose `fullName`
//! text is missing or blank.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The mapping file extension is neither `.csv` nor `.json`.
    #[error("unsupported mapping format for {}: use a .csv or .json file", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The mapping file parsed, but does not have the required shape.
    #[error("malformed mapping in {}: {reason}", .path.display())]
    MalformedMapping { path: PathBuf, reason: String },

    /// The input document is not well-formed XML.
    #[error("invalid XML: {0}")]
    InvalidXml(String),

    /// The output directory or file could not be written.
    #[error("cannot write {}", .path.display())]
    WriteFailure { path: PathBuf, source: io::Error },

    /// An input file does not exist or cannot be opened.
    #[error("cannot open {}", .path.display())]
    MissingFile { path: PathBuf, source: io::Error },
}
