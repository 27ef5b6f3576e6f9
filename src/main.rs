// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use fsatlas::{read_annot, run_generate, GenerateConfig, Geometry};

mod cli;
use cli::display;
use cli::{Cli, Commands};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                e.print().ok();
                process::exit(1);
            }
        },
    };

    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Labels { file, json } => run_labels(&file, json),
        Commands::Generate {
            geometry,
            all,
            config,
            subject,
            subjects_dir,
            out_dir,
        } => {
            let geometries = if all {
                Geometry::ALL.to_vec()
            } else {
                vec![geometry]
            };
            load_config(config.as_deref())
                .map(|c| c.with_overrides(subject, subjects_dir, out_dir))
                .and_then(|c| generate(&c, &geometries))
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", display::error_prefix(), e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for label lists and JSON.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// ============================================================================
// LABELS
// ============================================================================

#[derive(Serialize)]
struct LabelReport<'a> {
    file: String,
    has_color_table: bool,
    names: Vec<&'a str>,
    diagnostics: Vec<DiagnosticReport>,
}

#[derive(Serialize)]
struct DiagnosticReport {
    index: usize,
    offset: usize,
    reason: String,
    skipped_entries: usize,
}

/// List structure names. A partial decode still exits zero.
fn run_labels(path: &Path, json: bool) -> Result<()> {
    let decoded = read_annot(path)?;
    let file_name = short_name(path);

    if json {
        let report = LabelReport {
            file: file_name,
            has_color_table: decoded.has_color_table(),
            names: decoded.names(),
            diagnostics: decoded
                .diagnostic
                .iter()
                .map(|d| DiagnosticReport {
                    index: d.index,
                    offset: d.offset,
                    reason: d.fault.to_string(),
                    skipped_entries: decoded.skipped_entries(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let names = decoded.names();
    println!();
    println!("{}", display::heading(&format!("Labels in {}:", file_name)));
    println!("Total: {} labels", names.len());
    println!();
    for name in &names {
        println!("  {}", name);
    }

    if let Some(diagnostic) = &decoded.diagnostic {
        eprintln!(
            "{} {} ({} of {} declared entries not decoded)",
            display::warning_prefix(),
            diagnostic,
            decoded.skipped_entries(),
            names.len() + decoded.skipped_entries()
        );
    }

    Ok(())
}

// ============================================================================
// GENERATE
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<GenerateConfig> {
    match path {
        Some(path) => GenerateConfig::load(path),
        None => Ok(GenerateConfig::default()),
    }
}

fn generate(config: &GenerateConfig, geometries: &[Geometry]) -> Result<()> {
    eprintln!("Brain Atlas Data Generator");
    eprintln!("Subject: {}", config.subject);
    eprintln!("Surfaces: {}", config.surf_dir().display());
    eprintln!("Output directory: {}", config.out_dir.display());
    eprintln!();

    let meshes = run_generate(config, geometries).context("export failed")?;

    for mesh in &meshes {
        eprintln!(
            "  {} {} ({} vertices, {})",
            display::success_mark(),
            short_name(&mesh.path),
            mesh.vertex_count,
            display::format_size(mesh.bytes)
        );
    }
    let total: usize = meshes.iter().map(|m| m.bytes).sum();
    eprintln!();
    eprintln!(
        "✅ Exported {} files │ {}",
        meshes.len(),
        display::format_size(total)
    );
    Ok(())
}

fn short_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
