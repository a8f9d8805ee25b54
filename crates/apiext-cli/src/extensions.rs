//! # Extensions Subcommand
//!
//! Report every vendor extension in a schema tree, one per line:
//! `<pointer>\t<key>\t<raw value>`. The pointer of the root schema is
//! empty.

use std::io::Write;

use clap::Args;

use crate::input::InputArgs;

/// Arguments for the extensions subcommand.
#[derive(Args, Debug, Clone)]
pub struct ExtensionsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Run `apiext extensions`. Returns the number of extensions reported.
pub fn run(args: &ExtensionsArgs, out: &mut impl Write) -> anyhow::Result<usize> {
    let schema = args.input.load_schema()?;
    let found = schema.nested_extensions();
    for ext in &found {
        writeln!(out, "{}\t{}\t{}", ext.pointer, ext.key, ext.value)?;
    }
    Ok(found.len())
}
