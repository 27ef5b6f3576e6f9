// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Where subject data is read from and JSON is written to.
///
/// Loaded from an optional JSON file; every field has a default, unknown
/// fields are rejected so a typo does not silently fall back to a default.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub subject: String,
    pub subjects_dir: PathBuf,
    pub out_dir: PathBuf,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            subject: "fsaverage".to_string(),
            subjects_dir: PathBuf::from("data"),
            out_dir: PathBuf::from("data/json"),
        }
    }
}

impl GenerateConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("invalid config JSON in {}", path.display()))
    }

    /// Command-line values win over file values.
    pub fn with_overrides(
        mut self,
        subject: Option<String>,
        subjects_dir: Option<PathBuf>,
        out_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(subject) = subject {
            self.subject = subject;
        }
        if let Some(dir) = subjects_dir {
            self.subjects_dir = dir;
        }
        if let Some(dir) = out_dir {
            self.out_dir = dir;
        }
        self
    }

    /// `<subjects_dir>/<subject>/surf`
    pub fn surf_dir(&self) -> PathBuf {
        self.subjects_dir.join(&self.subject).join("surf")
    }
}
