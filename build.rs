//! Build script for TriFit
//!
//! Stamps each compile with a running build number, a UTC timestamp and the
//! cargo profile.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const COUNTER_FILE: &str = "build_number.txt";

fn next_build_number(counter: &Path) -> u64 {
    fs::read_to_string(counter)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0)
        + 1
}

fn main() {
    // Sources only; a plain `cargo build` with nothing changed keeps the number
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=Cargo.toml");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    let counter = manifest_dir.join(COUNTER_FILE);

    let build = next_build_number(&counter);
    if let Err(e) = fs::write(&counter, build.to_string()) {
        println!("cargo:warning=could not update {}: {}", COUNTER_FILE, e);
    }

    let stamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".into());

    for (key, value) in [
        ("TRIFIT_BUILD_NUMBER", build.to_string()),
        ("TRIFIT_BUILD_TIMESTAMP", stamp),
        ("TRIFIT_BUILD_PROFILE", profile),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }
}
