//! # Check Subcommand
//!
//! Decode a schema document without re-encoding it.

use std::io::Write;

use clap::Args;

use crate::input::InputArgs;

/// Arguments for the check subcommand.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Run `apiext check`. Decode failures are returned as errors.
pub fn run(args: &CheckArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let schema = args.input.load_schema()?;
    let mut nodes = 0usize;
    schema.walk(&mut |_, _| nodes += 1);
    writeln!(out, "ok: {} ({nodes} schemas)", args.input.path.display())?;
    Ok(())
}
