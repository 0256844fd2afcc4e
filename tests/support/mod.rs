//! Shared helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::process::Command;

/// Fixture asset root with runtime, vendor files, five syntaxes and two themes
pub fn assets_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("assets")
}

/// A `fractus` command with FRACTUS_* variables cleared
pub fn fractus() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fractus"));
    for var in [
        "FRACTUS_ASSETS_DIR",
        "FRACTUS_BANNER",
        "FRACTUS_LOG_LEVEL",
        "FRACTUS_LOG_JSON",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}
