//! Custom cargo commands for fsatlas.
//!
//! Usage:
//!   cargo xtask verify        - Tests, clippy, Kani proofs, fuzz target registry
//!   cargo xtask test          - Run all tests
//!   cargo xtask check         - Quick check (no Kani)
//!   cargo xtask kani          - Run the cursor bounds proofs
//!   cargo xtask fuzz <TARGET> - Fuzz one target for a minute
//!   cargo xtask bench         - Run benchmarks

use anyhow::{bail, Context, Result};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// Seconds per target for `cargo xtask fuzz`.
const FUZZ_SECONDS: u32 = 60;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    match args.next().as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("kani") => kani()?,
        Some("fuzz") => match args.next() {
            Some(target) => fuzz(&target)?,
            None => bail!("usage: cargo xtask fuzz <TARGET>"),
        },
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify          Run full verification suite (tests + clippy + Kani + fuzz registry)
  test            Run all Rust tests
  check           Quick check (cargo test + clippy, no Kani)
  kani            Run Kani proofs only
  fuzz <TARGET>   Fuzz one target for {FUZZ_SECONDS}s
  bench           Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("fsatlas Verification Suite");
    println!("==========================================\n");

    println!("[1/5] Checking fuzz target registry...");
    check_fuzz_targets()?;
    println!("✓ Every fuzz target is registered\n");

    println!("[2/5] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/5] Running tests without the parallel feature...");
    run_cargo(&["test", "--quiet", "--no-default-features"])?;
    println!("✓ Sequential export passed\n");

    println!("[4/5] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[5/5] Running Kani proofs...");
    kani()?;
    println!("✓ Kani proofs passed\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check (no Kani)
fn check() -> Result<()> {
    println!("Running quick checks...\n");

    println!("[1/3] cargo check...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/3] cargo test...");
    run_cargo(&["test", "--quiet"])?;

    println!("[3/3] cargo clippy...");
    run_cargo(&["clippy", "--quiet", "--", "-D", "warnings"])?;

    println!("\n✓ Quick checks passed");
    Ok(())
}

/// Cursor bounds proofs. Skipped when cargo-kani is not installed.
fn kani() -> Result<()> {
    let installed = Command::new("cargo")
        .args(["kani", "--version"])
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);
    if !installed {
        println!("  (cargo-kani not installed, skipping)");
        return Ok(());
    }
    run_cargo(&["kani", "--lib"])
}

fn fuzz(target: &str) -> Result<()> {
    let root = project_root()?;
    let max_time = format!("-max_total_time={}", FUZZ_SECONDS);

    let status = Command::new("cargo")
        .args(["+nightly", "fuzz", "run", target, "--", &max_time])
        .current_dir(&root)
        .status()
        .context("Failed to run cargo fuzz (is cargo-fuzz installed?)")?;

    if !status.success() {
        bail!("fuzz target {} failed", target);
    }
    Ok(())
}

fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("no current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}

/// Every file in `fuzz/fuzz_targets` needs a `[[bin]]` entry, or cargo-fuzz
/// silently never runs it.
fn check_fuzz_targets() -> Result<()> {
    let fuzz_dir = project_root()?.join("fuzz");

    let on_disk: BTreeSet<String> = fs::read_dir(fuzz_dir.join("fuzz_targets"))
        .context("Failed to list fuzz targets")?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            name.strip_suffix(".rs").map(str::to_string)
        })
        .collect();

    let manifest = fs::read_to_string(fuzz_dir.join("Cargo.toml"))
        .context("Failed to read fuzz/Cargo.toml")?;
    let registered: BTreeSet<String> = manifest
        .lines()
        .filter_map(|line| line.trim().strip_prefix("path = \"fuzz_targets/"))
        .filter_map(|rest| rest.strip_suffix(".rs\""))
        .map(str::to_string)
        .collect();

    let missing: Vec<_> = on_disk.difference(&registered).collect();
    if !missing.is_empty() {
        bail!("fuzz targets without a [[bin]] entry: {:?}", missing);
    }
    let stale: Vec<_> = registered.difference(&on_disk).collect();
    if !stale.is_empty() {
        bail!("[[bin]] entries without a fuzz target: {:?}", stale);
    }

    Ok(())
}
