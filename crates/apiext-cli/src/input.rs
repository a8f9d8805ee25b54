//! # Document Input
//!
//! Shared arguments and loading for every subcommand. A document is read
//! from a path (or stdin for `-`) and, when it is YAML, converted to JSON
//! bytes before decoding: the schema codecs only read JSON.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use apiext_schema::Schema;
use clap::{Args, ValueEnum};

/// Input document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Guess from the file extension; anything but `.yaml`/`.yml` is JSON.
    pub fn detect(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Arguments naming the document to read.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Schema document path, or `-` for stdin.
    pub path: PathBuf,

    /// Input format. Detected from the file extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,
}

impl InputArgs {
    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }

    /// The effective format of the input.
    pub fn format(&self) -> InputFormat {
        self.format.unwrap_or_else(|| {
            if self.is_stdin() {
                InputFormat::Json
            } else {
                InputFormat::detect(&self.path)
            }
        })
    }

    /// Read the raw document bytes.
    pub fn read_bytes(&self) -> anyhow::Result<Vec<u8>> {
        if self.is_stdin() {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            return Ok(buf);
        }
        std::fs::read(&self.path).with_context(|| format!("failed to read {}", self.path.display()))
    }

    /// Read the document and return it as JSON bytes.
    pub fn read_json(&self) -> anyhow::Result<Vec<u8>> {
        let bytes = self.read_bytes()?;
        match self.format() {
            InputFormat::Json => Ok(bytes),
            InputFormat::Yaml => yaml_to_json(&bytes)
                .with_context(|| format!("failed to parse YAML in {}", self.path.display())),
        }
    }

    /// Read and decode the document as a schema.
    pub fn load_schema(&self) -> anyhow::Result<Schema> {
        let json = self.read_json()?;
        let schema = Schema::from_slice(&json)
            .with_context(|| format!("failed to decode schema {}", self.path.display()))?;
        tracing::debug!(
            path = %self.path.display(),
            extensions = schema.nested_extensions().len(),
            "loaded schema"
        );
        Ok(schema)
    }
}

/// Convert a YAML document to compact JSON bytes.
pub fn yaml_to_json(bytes: &[u8]) -> anyhow::Result<Vec<u8>> {
    let tree: serde_json::Value = serde_yaml::from_slice(bytes)?;
    Ok(serde_json::to_vec(&tree)?)
}
