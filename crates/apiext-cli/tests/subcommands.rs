//! Subcommand handlers run against documents on disk.

use std::io::Write;
use std::path::PathBuf;

use apiext_cli::check::{self, CheckArgs};
use apiext_cli::extensions::{self, ExtensionsArgs};
use apiext_cli::fmt::{self, FmtArgs};
use apiext_cli::input::{InputArgs, InputFormat};

fn write_doc(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

fn input(path: PathBuf) -> InputArgs {
    InputArgs { path, format: None }
}

#[test]
fn fmt_drops_unknown_keys_and_keeps_extensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(
        &dir,
        "schema.json",
        r#"{"type": "string", "x-kubernetes-bogus": 1, "bogus": 2, "x-keep": {"a": 1}}"#,
    );
    let mut out = Vec::new();
    fmt::run(
        &FmtArgs {
            input: input(path),
            pretty: false,
        },
        &mut out,
    )
    .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"type\":\"string\",\"x-keep\":{\"a\": 1}}\n"
    );
}

#[test]
fn fmt_pretty_output_is_indented() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(&dir, "schema.json", r#"{"type":"object","required":["a"]}"#);
    let mut out = Vec::new();
    fmt::run(
        &FmtArgs {
            input: input(path),
            pretty: true,
        },
        &mut out,
    )
    .unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\n  \"type\": \"object\""));
}

#[test]
fn yaml_input_is_detected_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(
        &dir,
        "schema.yaml",
        "type: object\nproperties:\n  spec:\n    type: object\n    x-order: 2\n",
    );
    let mut out = Vec::new();
    let count = extensions::run(&ExtensionsArgs { input: input(path) }, &mut out).unwrap();
    assert_eq!(count, 1);
    assert_eq!(String::from_utf8(out).unwrap(), "/properties/spec\tx-order\t2\n");
}

#[test]
fn extensions_reports_root_with_empty_pointer() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(&dir, "schema.json", r#"{"x-a": "v", "x-kubernetes-b": true}"#);
    let mut out = Vec::new();
    let count = extensions::run(&ExtensionsArgs { input: input(path) }, &mut out).unwrap();
    assert_eq!(count, 1);
    assert_eq!(String::from_utf8(out).unwrap(), "\tx-a\t\"v\"\n");
}

#[test]
fn check_counts_nested_schemas() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(
        &dir,
        "schema.json",
        r#"{"properties": {"a": {}, "b": {"items": {}}}}"#,
    );
    let mut out = Vec::new();
    check::run(
        &CheckArgs {
            input: input(path.clone()),
        },
        &mut out,
    )
    .unwrap();
    let expected = format!("ok: {} (4 schemas)\n", path.display());
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn check_reports_malformed_union() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(&dir, "schema.json", r#"{"additionalProperties": "yes"}"#);
    let mut out = Vec::new();
    let err = check::run(
        &CheckArgs {
            input: input(path),
        },
        &mut out,
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("boolean or JSON schema expected"));
    assert!(out.is_empty());
}

#[test]
fn explicit_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_doc(&dir, "schema.txt", "type: string\n");
    let args = InputArgs {
        path,
        format: Some(InputFormat::Yaml),
    };
    let schema = args.load_schema().unwrap();
    assert_eq!(schema.type_, "string");
}
