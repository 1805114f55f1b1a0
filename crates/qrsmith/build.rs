// Build scripts signal errors by panicking; there is no caller to
// return Result to.  Cargo treats a non-zero exit as a build failure.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Build script for the qrsmith binary crate.
//!
//! Runs `npx @tailwindcss/cli` to compile `crates/qrsmith/tailwind.css`
//! into `$OUT_DIR/assets/tailwind.css`, so every `cargo` invocation
//! (clippy, test, coverage) can compile without `dx build` having run
//! first.  `main.rs` embeds the result via
//! `include_str!(env!("TAILWIND_CSS_PATH"))`.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fs};

/// Crates whose `.rs` files carry Tailwind utility classes.
const UI_CRATES: &[&str] = &["qrsmith", "qrsmith-io"];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());

    // This crate lives at `<workspace>/crates/qrsmith/`.
    let crates_dir = manifest_dir
        .parent()
        .expect("could not find crates directory");

    build_tailwind_css(&manifest_dir, crates_dir, &out_dir);
}

/// Compile Tailwind CSS via `npx @tailwindcss/cli`.
///
/// Input:  `crates/qrsmith/tailwind.css`
/// Output: `$OUT_DIR/assets/tailwind.css`, exposed as `TAILWIND_CSS_PATH`.
fn build_tailwind_css(manifest_dir: &Path, crates_dir: &Path, out_dir: &Path) {
    let input = manifest_dir.join("tailwind.css");
    let assets_dir = out_dir.join("assets");
    let output = assets_dir.join("tailwind.css");

    fs::create_dir_all(&assets_dir)
        .unwrap_or_else(|e| panic!("failed to create {}: {e}", assets_dir.display()));

    println!("cargo:rerun-if-changed={}", input.display());

    // Tailwind scans these sources for class names via `@source`.
    for name in UI_CRATES {
        register_rs_sources(&crates_dir.join(name));
    }

    let input_lossy = input.to_string_lossy();
    let output_lossy = output.to_string_lossy();
    let mut args: Vec<&str> = vec!["@tailwindcss/cli", "-i", &input_lossy, "-o", &output_lossy];

    let profile = env::var("PROFILE").unwrap_or_default();
    if profile == "release" {
        args.push("--minify");
    }

    let status = Command::new("npx")
        .args(&args)
        .status()
        .unwrap_or_else(|e| {
            panic!(
                "failed to run `npx @tailwindcss/cli`: {e}\n\
                 \n\
                 Tailwind CSS is compiled from build.rs and requires Node.js / npm.\n\
                 Install Node.js (https://nodejs.org/) and ensure `npx` is on PATH."
            )
        });

    assert!(
        status.success(),
        "`npx @tailwindcss/cli` exited with {status}"
    );

    println!("cargo:rustc-env=TAILWIND_CSS_PATH={}", output.display());
}

/// Recursively emit `cargo:rerun-if-changed` for every `.rs` file
/// under `dir`.
fn register_rs_sources(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            register_rs_sources(&path);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }
}
