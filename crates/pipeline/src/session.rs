//! Sequential batch sessions.
//!
//! A session runs the two analysis stages in order over a set of input
//! directories: `utseg` once per existing directory, then `morphotag`
//! once over the pooled segmentation output. Everything is synchronous;
//! each invocation completes before the next starts. Failures never abort
//! the run; they are tallied and the dependent stage is skipped when no
//! segmentation succeeded.

use std::path::{Path, PathBuf};

use chabatch_common::error::{ChabatchError, ChabatchResult};

use crate::discover::find_cha_files;
use crate::summary::{RunSummary, StageTally};
use crate::tool::{BatchalignTool, ToolStage};

/// A batch run ready to execute.
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// Input directories to process, in order.
    pub input_dirs: Vec<PathBuf>,

    /// Base directory under which the run directory is created.
    pub output_base: PathBuf,

    /// Language code for segmentation.
    pub lang: String,

    /// Whether tagging retokenizes to fit UD tokenizations.
    pub retokenize: bool,
}

/// Filesystem layout of one run.
#[derive(Debug, Clone)]
pub struct RunLayout {
    /// Timestamped run directory.
    pub run_dir: PathBuf,

    /// Stage 1 output directory.
    pub utseg_dir: PathBuf,

    /// Stage 2 output directory.
    pub morphotag_dir: PathBuf,
}

/// Result of a finished batch run.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub layout: RunLayout,
    pub summary: RunSummary,

    /// Path of the plain-text summary file.
    pub summary_path: PathBuf,
}

/// Create the timestamped run directory and its stage subdirectories.
pub fn prepare_run_dir(output_base: &Path) -> ChabatchResult<RunLayout> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let run_dir = output_base.join(format!("morphosyntactic_analysis_{timestamp}"));
    let utseg_dir = run_dir.join("1_utseg_results");
    let morphotag_dir = run_dir.join("2_morphotag_results");

    std::fs::create_dir_all(&utseg_dir)?;
    std::fs::create_dir_all(&morphotag_dir)?;

    Ok(RunLayout {
        run_dir,
        utseg_dir,
        morphotag_dir,
    })
}

/// Execute the two-stage batch run and write its summary.
pub fn run_batch(job: &BatchJob, tool: &BatchalignTool) -> ChabatchResult<BatchOutcome> {
    if job.input_dirs.is_empty() {
        return Err(ChabatchError::pipeline("no input directories to process"));
    }

    let input_dirs = find_cha_files(&job.input_dirs)?;
    let total_files: usize = input_dirs.iter().map(|r| r.file_count()).sum();

    for report in input_dirs.iter().filter(|r| !r.exists) {
        tracing::warn!(dir = %report.path.display(), "Input directory does not exist, skipping");
    }

    let layout = prepare_run_dir(&job.output_base)?;
    tracing::info!(
        run_dir = %layout.run_dir.display(),
        dirs = job.input_dirs.len(),
        files = total_files,
        "Starting batch run"
    );

    let mut utseg = StageTally::default();
    if total_files == 0 {
        tracing::warn!("No .cha files found in the specified directories");
    } else {
        let stage = ToolStage::Utseg {
            lang: job.lang.clone(),
        };
        for report in input_dirs.iter().filter(|r| r.exists) {
            let invocation = tool.run(&stage, &report.path, &layout.utseg_dir)?;
            utseg.record(invocation.outcome.is_success());
        }
    }

    // Tagging consumes the pooled segmentation output, so it only makes
    // sense when at least one directory segmented successfully.
    let mut morphotag = StageTally::default();
    if utseg.succeeded > 0 {
        let stage = ToolStage::Morphotag {
            retokenize: job.retokenize,
        };
        let invocation = tool.run(&stage, &layout.utseg_dir, &layout.morphotag_dir)?;
        morphotag.record(invocation.outcome.is_success());
    } else {
        tracing::info!("Skipping morphotag: no successful utseg runs");
    }

    let summary = RunSummary {
        generated_at: chrono::Utc::now().to_rfc3339(),
        input_dirs,
        total_files,
        utseg,
        morphotag,
        utseg_dir: layout.utseg_dir.clone(),
        morphotag_dir: layout.morphotag_dir.clone(),
    };
    let (summary_path, _) = summary.write_to(&layout.run_dir)?;

    tracing::info!(
        summary = %summary_path.display(),
        utseg_ok = summary.utseg.succeeded,
        utseg_failed = summary.utseg.failed,
        morphotag_ok = summary.morphotag.succeeded,
        "Batch run complete"
    );

    Ok(BatchOutcome {
        layout,
        summary,
        summary_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_input_list_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let job = BatchJob {
            input_dirs: vec![],
            output_base: tmp.path().to_path_buf(),
            lang: "eng".to_string(),
            retokenize: true,
        };
        let tool = BatchalignTool::new("batchalign", Duration::from_secs(1));

        let err = run_batch(&job, &tool).unwrap_err();
        assert!(err.to_string().contains("no input directories"));
    }

    #[test]
    fn prepare_run_dir_creates_stage_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        let layout = prepare_run_dir(tmp.path()).unwrap();

        assert!(layout.utseg_dir.is_dir());
        assert!(layout.morphotag_dir.is_dir());
        assert!(layout.utseg_dir.ends_with("1_utseg_results"));
        assert!(layout.morphotag_dir.ends_with("2_morphotag_results"));

        let run_name = layout.run_dir.file_name().unwrap().to_string_lossy();
        assert!(run_name.starts_with("morphosyntactic_analysis_"));
    }
}
