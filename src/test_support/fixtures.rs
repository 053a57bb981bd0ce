//! Test fixtures for common test scenarios.
//!
//! Each fixture writes a small contract project into a directory and returns
//! the interesting paths.

use std::fs;
use std::path::{Path, PathBuf};

/// A minimal WASM module: magic number plus version 1.
pub const WASM_BYTES: &[u8] = &[0x00, 0x61, 0x73, 0x6d, 0x01, 0x00, 0x00, 0x00];

/// Hex of [`WASM_BYTES`].
pub const WASM_HEX: &str = "0061736d01000000";

/// C source for a trivial contract.
pub const ADDER_C: &str = r#"typedef unsigned long long i64;

void int64finish(i64 value);

void init() {}

void callback() {}

void add() {
    int64finish(42);
}
"#;

/// Write a C project: `<name>.c` plus `<name>.export` with `exports`.
pub fn c_project(dir: &Path, name: &str, exports: &[&str]) -> PathBuf {
    let unit = dir.join(format!("{}.c", name));
    fs::write(&unit, ADDER_C).unwrap();

    let mut export = exports.join("\n");
    export.push('\n');
    fs::write(dir.join(format!("{}.export", name)), export).unwrap();

    unit
}

/// Write a Solidity project with a single contract.
pub fn sol_project(dir: &Path, name: &str) -> PathBuf {
    let unit = dir.join(format!("{}.sol", name));
    fs::write(
        &unit,
        "pragma solidity ^0.5.0;\n\ncontract Counter {\n    uint256 count;\n}\n",
    )
    .unwrap();
    unit
}

/// Write a Rust project whose manifest names the package `name`.
///
/// Returns the manifest path.
pub fn rust_project(dir: &Path, name: &str) -> PathBuf {
    let manifest = dir.join("Cargo.toml");
    fs::write(
        &manifest,
        format!(
            r#"[package]
name = "{name}"
version = "0.1.0"
edition = "2018"

[[bin]]
name = "wasm"
path = "wasm/main.rs"
"#
        ),
    )
    .unwrap();
    manifest
}
