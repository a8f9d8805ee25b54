//! # apiext-cli: Schema Document Tool
//!
//! Command-line access to the apiext schema codecs.
//!
//! ## Subcommands
//!
//! - `fmt`: decode and re-emit a schema document in canonical form
//! - `extensions`: list the vendor extensions of every nested schema
//! - `check`: decode only, reporting the first error
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers write to a caller-supplied writer so they can be tested.
//! - No codec logic here: everything delegates to `apiext-schema`.

pub mod check;
pub mod extensions;
pub mod fmt;
pub mod input;
