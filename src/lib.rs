//! sfvset - Salesforce GlobalValueSet label rewriter
//!
//! sfvset is a CLI tool and library for rewriting the value labels inside a
//! Salesforce GlobalValueSet XML export. It loads an original-to-replacement
//! mapping from a CSV or JSON file, rewrites every matching `fullName` text
//! node in a single pass, and writes the converted document to an output
//! directory (or just reports what it would do in dry-run mode).
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, run orchestration)
//! - `error`: The failure kinds a run can end with
//! - `mapping`: Replacement mapping loading (CSV and JSON)
//! - `report`: Console reporting
//! - `transform`: The XML walk-and-replace pipeline

pub mod cli;
pub mod error;
pub mod mapping;
pub mod report;
pub mod transform;
