//! Environment checks.
//!
//! A run needs the external tool on PATH and somewhere to write results.
//! These checks report what is missing and how to fix it before any
//! transcripts are touched.

use std::path::Path;
use std::time::Duration;

use chabatch_common::config::AppConfig;

use crate::tool::BatchalignTool;

/// A prerequisite that a batch run may need.
#[derive(Debug, Clone)]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub required: bool,
    pub fix_instructions: Option<String>,
}

/// Check all prerequisites and report status.
pub fn check_capabilities(config: &AppConfig) -> Vec<Capability> {
    let mut capabilities = vec![check_tool(config), check_output_base(&config.output_base)];
    for dir in &config.input_dirs {
        capabilities.push(check_input_dir(dir));
    }
    capabilities
}

/// Whether every required capability is available.
pub fn all_required_available(capabilities: &[Capability]) -> bool {
    capabilities
        .iter()
        .filter(|c| c.required)
        .all(|c| c.available)
}

/// Check that the external tool answers its `version` smoke test.
fn check_tool(config: &AppConfig) -> Capability {
    let tool = BatchalignTool::new(
        &config.tool.binary,
        Duration::from_secs(config.tool.timeout_secs),
    );
    let available = tool.is_available();

    Capability {
        name: "Analysis tool".to_string(),
        description: format!("`{} version` smoke test", config.tool.binary),
        available,
        required: true,
        fix_instructions: if !available {
            Some(format!(
                "Install batchalign and ensure `{}` is on PATH (pip install batchalign)",
                config.tool.binary
            ))
        } else {
            None
        },
    }
}

/// Check that the output base can receive run directories.
fn check_output_base(output_base: &Path) -> Capability {
    let available = output_base.is_dir()
        || output_base
            .parent()
            .map(|parent| parent.as_os_str().is_empty() || parent.is_dir())
            .unwrap_or(false);

    Capability {
        name: "Output directory".to_string(),
        description: format!("run directories created under {}", output_base.display()),
        available,
        required: true,
        fix_instructions: if !available {
            Some(format!("Create it first: mkdir -p {}", output_base.display()))
        } else {
            None
        },
    }
}

/// Check that a configured input directory is present.
fn check_input_dir(dir: &Path) -> Capability {
    let available = dir.is_dir();

    Capability {
        name: "Input directory".to_string(),
        description: dir.display().to_string(),
        available,
        required: false, // missing directories are skipped at run time
        fix_instructions: if !available {
            Some("Check the configured input_dirs paths".to_string())
        } else {
            None
        },
    }
}

/// Print a user-friendly capability report.
pub fn print_capability_report(capabilities: &[Capability]) {
    println!("chabatch Environment Check:");
    println!("{}", "-".repeat(60));

    for cap in capabilities {
        let status = if cap.available {
            "[OK]"
        } else if cap.required {
            "[MISSING - REQUIRED]"
        } else {
            "[MISSING - OPTIONAL]"
        };

        println!("  {} {}: {}", status, cap.name, cap.description);

        if let Some(ref fix) = cap.fix_instructions {
            println!("    Fix: {fix}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chabatch_common::config::AppConfig;

    fn config_with_bogus_tool(output_base: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.tool.binary = "/nonexistent/definitely-not-batchalign".to_string();
        config.output_base = output_base.to_path_buf();
        config
    }

    #[test]
    fn missing_tool_is_a_required_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_with_bogus_tool(tmp.path());

        let capabilities = check_capabilities(&config);
        let tool_cap = &capabilities[0];
        assert!(!tool_cap.available);
        assert!(tool_cap.required);
        assert!(tool_cap.fix_instructions.is_some());
        assert!(!all_required_available(&capabilities));
    }

    #[test]
    fn existing_output_base_is_available() {
        let tmp = tempfile::tempdir().unwrap();
        let cap = check_output_base(tmp.path());
        assert!(cap.available);
        assert!(cap.required);
    }

    #[test]
    fn creatable_output_base_counts_as_available() {
        let tmp = tempfile::tempdir().unwrap();
        let cap = check_output_base(&tmp.path().join("analysis_results"));
        assert!(cap.available);
    }

    #[test]
    fn deeply_missing_output_base_is_flagged() {
        let tmp = tempfile::tempdir().unwrap();
        let cap = check_output_base(&tmp.path().join("no").join("such").join("base"));
        assert!(!cap.available);
        assert!(cap.fix_instructions.is_some());
    }

    #[test]
    fn input_directories_are_optional() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = config_with_bogus_tool(tmp.path());
        config.input_dirs = vec![tmp.path().join("missing_transcripts")];

        let capabilities = check_capabilities(&config);
        let input_cap = capabilities.last().unwrap();
        assert!(!input_cap.available);
        assert!(!input_cap.required);
    }
}
