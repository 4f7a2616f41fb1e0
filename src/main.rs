#![allow(clippy::bool_comparison)]

use anyhow::{bail, Context, Result};
use clap::Parser;
use gl_spec_gen::{parse_file, GlSpec};
use log::*;

mod arg;
mod parse_fnames;

fn main() -> Result<()> {
    env_logger::init();

    let opts = arg::InputOpts::parse();
    let input = match opts.input {
        Some(input) => input,
        None => parse_fnames::default_input_dir().context("failed to locate the executable")?,
    };

    let fnames = parse_fnames::parse_fnames(&input)
        .with_context(|| format!("failed to read {}", input.display()))?;

    let mut spec = GlSpec::default();
    let mut failures = vec![];
    for (i, fname) in fnames.iter().enumerate() {
        println!("{:3}/{}: {}", i + 1, fnames.len(), fname.display());
        match parse_file(fname) {
            Ok(Some(document)) => spec.extend(document),
            Ok(None) => {}
            Err(e) => {
                error!("FAIL! {:?}: {:#}", fname, anyhow::Error::from(e));
                failures.push(fname);
            }
        }
    }

    info!(
        "{} variables, {} functions, {} failed pages",
        spec.variables.len(),
        spec.functions.len(),
        failures.len()
    );

    let json = spec.to_json()?;
    std::fs::write(&opts.output, json)
        .with_context(|| format!("failed to write {}", opts.output.display()))?;

    if failures.is_empty() == false {
        bail!(
            "{} of {} pages failed to parse: {:?}",
            failures.len(),
            fnames.len(),
            failures
        );
    }

    Ok(())
}
