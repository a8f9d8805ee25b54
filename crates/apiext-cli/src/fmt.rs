//! # Fmt Subcommand
//!
//! Decode a schema document and print its canonical encoding. Vendor
//! extensions survive; unknown keys (including unknown `x-kubernetes*`
//! keys) are dropped; union fields collapse to their canonical shape.

use std::io::Write;

use clap::Args;

use crate::input::InputArgs;

/// Arguments for the fmt subcommand.
#[derive(Args, Debug, Clone)]
pub struct FmtArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Indent the output.
    #[arg(long)]
    pub pretty: bool,
}

/// Run `apiext fmt`, writing the encoded schema and a trailing newline.
pub fn run(args: &FmtArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let schema = args.input.load_schema()?;
    let encoded = if args.pretty {
        schema.to_vec_pretty()?
    } else {
        schema.to_vec()?
    };
    out.write_all(&encoded)?;
    out.write_all(b"\n")?;
    Ok(())
}
