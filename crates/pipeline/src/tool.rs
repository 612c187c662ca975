//! Invocation contract with the external batchalign binary.
//!
//! Command form: `<tool> <subcommand> <input_dir> <output_dir> [flags]`.
//! Exit code 0 is success; any other exit, a spawn failure, or a timeout
//! counts as failure. stdout and stderr are redirected to a per-directory
//! log file so a failed directory can be diagnosed after the run.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use chabatch_common::error::ChabatchResult;

/// External tool subcommands used by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStage {
    /// Utterance segmentation.
    Utseg { lang: String },

    /// Morphosyntactic tagging.
    Morphotag { retokenize: bool },
}

impl ToolStage {
    /// Subcommand name as passed on the command line.
    pub fn subcommand(&self) -> &'static str {
        match self {
            ToolStage::Utseg { .. } => "utseg",
            ToolStage::Morphotag { .. } => "morphotag",
        }
    }

    /// Flags appended after the input and output directory arguments.
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        match self {
            ToolStage::Utseg { lang } => {
                flags.push("--lang".to_string());
                flags.push(lang.clone());
            }
            ToolStage::Morphotag { retokenize } => {
                if *retokenize {
                    flags.push("--retokenize".to_string());
                }
            }
        }
        flags.push("-v".to_string());
        flags.push("1".to_string());
        flags
    }
}

/// How a finished invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationOutcome {
    Success,
    Failed { exit_code: Option<i32> },
    TimedOut,
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Success)
    }
}

/// Record of a single completed invocation.
#[derive(Debug, Clone)]
pub struct InvocationReport {
    /// Subcommand that was run.
    pub subcommand: &'static str,

    /// Input directory the tool was pointed at.
    pub input_dir: PathBuf,

    /// Log file holding the tool's stdout and stderr.
    pub log_path: PathBuf,

    /// Terminal state of the invocation.
    pub outcome: InvocationOutcome,

    /// Wall-clock duration of the invocation.
    pub duration: Duration,
}

/// Handle to the external tool binary.
#[derive(Debug, Clone)]
pub struct BatchalignTool {
    binary: String,
    timeout: Duration,
}

impl BatchalignTool {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Binary name as configured.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Smoke test: the tool's `version` subcommand must exit 0.
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Run one stage over an input directory.
    ///
    /// Tool failures (non-zero exit, spawn error, timeout) are reported in
    /// the returned outcome so callers can tally them; `Err` is reserved
    /// for the pipeline's own I/O problems such as an uncreatable log file.
    pub fn run(
        &self,
        stage: &ToolStage,
        input_dir: &Path,
        output_dir: &Path,
    ) -> ChabatchResult<InvocationReport> {
        let subcommand = stage.subcommand();
        let log_path = output_dir.join(log_file_name(input_dir, subcommand));
        let log_file = std::fs::File::create(&log_path)?;
        let log_file_err = log_file.try_clone()?;

        tracing::info!(
            tool = %self.binary,
            subcommand,
            input = %input_dir.display(),
            output = %output_dir.display(),
            "Running tool stage"
        );

        let started = Instant::now();
        let mut command = Command::new(&self.binary);
        command
            .arg(subcommand)
            .arg(input_dir)
            .arg(output_dir)
            .args(stage.flags())
            .stdin(Stdio::null())
            .stdout(Stdio::from(log_file))
            .stderr(Stdio::from(log_file_err));

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(tool = %self.binary, subcommand, "Failed to spawn tool: {e}");
                std::fs::write(&log_path, format!("failed to spawn {}: {e}\n", self.binary))?;
                return Ok(InvocationReport {
                    subcommand,
                    input_dir: input_dir.to_path_buf(),
                    log_path,
                    outcome: InvocationOutcome::Failed { exit_code: None },
                    duration: started.elapsed(),
                });
            }
        };

        let outcome = loop {
            match child.try_wait()? {
                Some(status) if status.success() => break InvocationOutcome::Success,
                Some(status) => {
                    break InvocationOutcome::Failed {
                        exit_code: status.code(),
                    }
                }
                None => {
                    if started.elapsed() >= self.timeout {
                        child.kill().ok();
                        child.wait().ok();
                        break InvocationOutcome::TimedOut;
                    }
                    std::thread::sleep(Duration::from_millis(100));
                }
            }
        };

        match outcome {
            InvocationOutcome::Success => {
                tracing::info!(subcommand, input = %input_dir.display(), "Stage succeeded");
            }
            InvocationOutcome::Failed { exit_code } => {
                tracing::warn!(
                    subcommand,
                    input = %input_dir.display(),
                    exit_code = ?exit_code,
                    log = %log_path.display(),
                    "Stage failed"
                );
            }
            InvocationOutcome::TimedOut => {
                tracing::warn!(
                    subcommand,
                    input = %input_dir.display(),
                    timeout_secs = self.timeout.as_secs(),
                    "Stage timed out"
                );
            }
        }

        Ok(InvocationReport {
            subcommand,
            input_dir: input_dir.to_path_buf(),
            log_path,
            outcome,
            duration: started.elapsed(),
        })
    }
}

/// Log file name for an invocation: `<basename>_<subcommand>.log`.
pub fn log_file_name(input_dir: &Path, subcommand: &str) -> String {
    let basename = input_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "input".to_string());
    format!("{basename}_{subcommand}.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utseg_flags_carry_language_and_verbosity() {
        let stage = ToolStage::Utseg {
            lang: "eng".to_string(),
        };
        assert_eq!(stage.subcommand(), "utseg");
        assert_eq!(stage.flags(), vec!["--lang", "eng", "-v", "1"]);
    }

    #[test]
    fn morphotag_flags_toggle_retokenize() {
        let on = ToolStage::Morphotag { retokenize: true };
        assert_eq!(on.subcommand(), "morphotag");
        assert_eq!(on.flags(), vec!["--retokenize", "-v", "1"]);

        let off = ToolStage::Morphotag { retokenize: false };
        assert_eq!(off.flags(), vec!["-v", "1"]);
    }

    #[test]
    fn log_file_name_uses_directory_basename() {
        let name = log_file_name(Path::new("./data/ENNI_B1_TD"), "utseg");
        assert_eq!(name, "ENNI_B1_TD_utseg.log");
    }

    #[test]
    fn log_file_name_falls_back_for_rootlike_paths() {
        let name = log_file_name(Path::new("/"), "morphotag");
        assert_eq!(name, "input_morphotag.log");
    }

    #[test]
    fn unresolvable_binary_is_not_available() {
        let tool = BatchalignTool::new(
            "/nonexistent/definitely-not-batchalign",
            Duration::from_secs(1),
        );
        assert!(!tool.is_available());
    }
}
