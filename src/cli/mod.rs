// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the fsatlas command-line interface.
//!
//! Two subcommands: `labels` lists the structure names embedded in an
//! annotation file, `generate` exports a subject's surfaces as JSON for the
//! viewer. `-v` is global and stacks.

pub mod display;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use fsatlas::Geometry;

#[derive(Parser)]
#[command(
    name = "fsatlas",
    about = "FreeSurfer surfaces and annotations to JSON for the brain atlas viewer",
    version
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the structure names in an annotation's color table
    Labels {
        /// Path to .annot file
        file: PathBuf,

        /// Print names and diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export surface meshes with curvature as JSON
    Generate {
        /// Geometry type to export
        #[arg(short, long, value_enum, default_value_t = Geometry::Inflated)]
        geometry: Geometry,

        /// Export every geometry type
        #[arg(short, long, conflicts_with = "geometry")]
        all: bool,

        /// JSON config file with subject, subjects_dir and out_dir
        #[arg(long)]
        config: Option<PathBuf>,

        /// Subject name (overrides config)
        #[arg(long)]
        subject: Option<String>,

        /// FreeSurfer SUBJECTS_DIR (overrides config)
        #[arg(long)]
        subjects_dir: Option<PathBuf>,

        /// Output directory for JSON files (overrides config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}
