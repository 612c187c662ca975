//! Run summaries.
//!
//! Every batch run writes a human-readable `analysis_summary.txt` into its
//! run directory, plus a machine-readable `analysis_summary.json` sidecar
//! with the same content.

use std::path::{Path, PathBuf};

use chabatch_common::error::ChabatchResult;
use serde::Serialize;

use crate::discover::DirReport;

/// Success/failure tally for one pipeline stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageTally {
    pub succeeded: usize,
    pub failed: usize,
}

impl StageTally {
    pub fn record(&mut self, success: bool) {
        if success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Report of one completed batch run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Wall-clock time the run started (RFC 3339).
    pub generated_at: String,

    /// Discovery report for each configured input directory.
    pub input_dirs: Vec<DirReport>,

    /// Total `.cha` files found across all directories.
    pub total_files: usize,

    /// Segmentation tally (one invocation per existing directory).
    pub utseg: StageTally,

    /// Tagging tally (a single invocation over pooled segmentation output).
    pub morphotag: StageTally,

    /// Segmentation output directory.
    pub utseg_dir: PathBuf,

    /// Tagging output directory.
    pub morphotag_dir: PathBuf,
}

impl RunSummary {
    /// Whether any tool invocation in the run failed.
    pub fn has_failures(&self) -> bool {
        self.utseg.failed > 0 || self.morphotag.failed > 0
    }

    /// Render the plain-text summary.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Morphosyntactic Analysis Summary\n");
        out.push_str(&format!("Generated on: {}\n", self.generated_at));

        out.push_str("\nInput directories:\n");
        for report in self.input_dirs.iter().filter(|r| r.exists) {
            out.push_str(&format!(
                "  - {} ({} .cha files)\n",
                report.path.display(),
                report.file_count()
            ));
        }
        let missing: Vec<_> = self.input_dirs.iter().filter(|r| !r.exists).collect();
        if !missing.is_empty() {
            out.push_str("\nMissing directories (skipped):\n");
            for report in missing {
                out.push_str(&format!("  - {}\n", report.path.display()));
            }
        }

        out.push_str(&format!("\nTotal .cha files found: {}\n", self.total_files));

        out.push_str("\nProcessing steps:\n");
        out.push_str(&format!(
            "  1. Utseg (utterance segmentation): {}/{} directories\n",
            self.utseg.succeeded,
            self.input_dirs.len()
        ));
        out.push_str(&format!(
            "  2. Morphotag (morphosyntactic tagging): {} directories\n",
            self.morphotag.succeeded
        ));

        out.push_str("\nOutput directories:\n");
        out.push_str(&format!("  - Utseg results: {}\n", self.utseg_dir.display()));
        out.push_str(&format!(
            "  - Morphotag results: {}\n",
            self.morphotag_dir.display()
        ));

        out.push_str("\nAll processed files:\n");
        for report in &self.input_dirs {
            for file in &report.files {
                out.push_str(&format!("  - {}\n", file.display()));
            }
        }

        out
    }

    /// Write both summary files into the run directory.
    ///
    /// Returns the paths of the text and JSON summaries.
    pub fn write_to(&self, run_dir: &Path) -> ChabatchResult<(PathBuf, PathBuf)> {
        let text_path = run_dir.join("analysis_summary.txt");
        std::fs::write(&text_path, self.render())?;

        let json_path = run_dir.join("analysis_summary.json");
        std::fs::write(&json_path, serde_json::to_string_pretty(self)?)?;

        Ok((text_path, json_path))
    }
}
