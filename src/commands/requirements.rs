//! Requirements command implementation
//!
//! Prints the declared requirements merged with the pinned ones, one per
//! line, pinned packages first.

use anyhow::Result;
use clap::Args;

use scaffold_ops::requirements::{reconcile, OwnedDeps};

/// Arguments for the requirements command
#[derive(Args, Debug)]
pub struct RequirementsArgs {
    /// Package pinned by the tool, as NAME=VERSION (repeatable)
    #[arg(long = "owned", value_name = "NAME=VERSION")]
    pub owned: Vec<String>,

    /// Declared requirements; items may also be separated by ';'
    #[arg(value_name = "REQUIREMENT")]
    pub declared: Vec<String>,
}

fn parse_owned(pairs: &[String]) -> Result<OwnedDeps> {
    let pairs = pairs
        .iter()
        .map(|pair| {
            pair.split_once('=').ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid --owned value: {pair}\n\n\
                     hint: Use NAME=VERSION, e.g. --owned pyscaffold=4.5.0"
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(OwnedDeps::parse(pairs)?)
}

/// Execute the requirements command
pub fn execute(args: RequirementsArgs) -> Result<()> {
    let owned = parse_owned(&args.owned)?;

    for requirement in reconcile(&args.declared, &owned)? {
        println!("{requirement}");
    }

    Ok(())
}
