//! Count transcript files without invoking the tool.

use std::path::PathBuf;

use chabatch_common::config::AppConfig;
use chabatch_pipeline::discover::find_cha_files;

pub fn run(dirs: Vec<PathBuf>) -> anyhow::Result<()> {
    let input_dirs = if dirs.is_empty() {
        AppConfig::load().input_dirs
    } else {
        dirs
    };
    if input_dirs.is_empty() {
        anyhow::bail!(
            "No input directories given (pass them as arguments or set input_dirs in the config)"
        );
    }

    let reports = find_cha_files(&input_dirs)?;

    println!("Transcript directories:");
    for report in &reports {
        if report.exists {
            println!(
                "  {} ({} .cha files)",
                report.path.display(),
                report.file_count()
            );
        } else {
            println!("  {} (missing)", report.path.display());
        }
    }

    let total: usize = reports.iter().map(|r| r.file_count()).sum();
    println!();
    println!("Total .cha files: {total}");

    Ok(())
}
