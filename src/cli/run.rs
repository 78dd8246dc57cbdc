//! Run orchestration: wires the mapping loader and the transformer together.
//!
//! Statistics are always printed before the write step runs, so a write
//! failure surfaces after the user has already seen the counters.

use anyhow::Result;

use super::args::Arguments;
use crate::mapping::Mapping;
use crate::{report, transform};

pub fn run(args: &Arguments) -> Result<()> {
    let mapping = Mapping::load(&args.replacements)?;
    report::mapping_loaded(mapping.len());

    let xml = transform::read_input(&args.xml)?;
    let transformed = transform::apply(&xml, &mapping, args.dry_run)?;
    report::stats(&transformed.stats);

    if args.dry_run {
        report::dry_run();
    } else {
        let output = transformed.write(&args.xml, &args.out)?;
        report::written(&output);
    }

    Ok(())
}
