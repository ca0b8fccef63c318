//! Identifier command implementation

use anyhow::Result;
use clap::Args;

use scaffold_ops::identifier::{make_valid_identifier, prepare_namespace};

/// Arguments for the identifier command
#[derive(Args, Debug)]
pub struct IdentifierArgs {
    /// Name to sanitize, or dotted namespace with --namespace
    pub name: String,

    /// Treat NAME as a dotted namespace and print every enclosing level
    #[arg(long)]
    pub namespace: bool,
}

/// Execute the identifier command
pub fn execute(args: IdentifierArgs) -> Result<()> {
    if args.namespace {
        for level in prepare_namespace(&args.name)? {
            println!("{level}");
        }
    } else {
        println!("{}", make_valid_identifier(&args.name)?);
    }

    Ok(())
}
