//! Run the two-stage batch analysis.

use std::path::PathBuf;
use std::time::Duration;

use chabatch_common::config::AppConfig;
use chabatch_pipeline::session::{run_batch, BatchJob};
use chabatch_pipeline::tool::BatchalignTool;

pub fn run(
    dirs: Vec<PathBuf>,
    output: Option<PathBuf>,
    tool: Option<String>,
    lang: Option<String>,
    no_retokenize: bool,
    timeout: Option<u64>,
) -> anyhow::Result<()> {
    let config = AppConfig::load();

    let input_dirs = if dirs.is_empty() {
        config.input_dirs.clone()
    } else {
        dirs
    };
    if input_dirs.is_empty() {
        anyhow::bail!(
            "No input directories given (pass them as arguments or set input_dirs in the config)"
        );
    }

    let binary = tool.unwrap_or(config.tool.binary);
    let timeout = Duration::from_secs(timeout.unwrap_or(config.tool.timeout_secs));
    let tool = BatchalignTool::new(binary, timeout);

    // Fail fast before creating any run directories.
    if !tool.is_available() {
        anyhow::bail!(
            "`{} version` failed; the tool is not invocable. Run `chabatch check` for details.",
            tool.binary()
        );
    }

    let job = BatchJob {
        input_dirs,
        output_base: output.unwrap_or(config.output_base),
        lang: lang.unwrap_or(config.tool.lang),
        retokenize: if no_retokenize {
            false
        } else {
            config.tool.retokenize
        },
    };

    let outcome = run_batch(&job, &tool)?;
    let summary = &outcome.summary;

    println!("Analysis complete!");
    println!("Results saved to: {}", outcome.layout.run_dir.display());
    println!(
        "  - Utseg results: {}",
        outcome.layout.utseg_dir.display()
    );
    println!(
        "  - Morphotag results: {}",
        outcome.layout.morphotag_dir.display()
    );
    println!("Summary saved to: {}", outcome.summary_path.display());

    if summary.has_failures() {
        anyhow::bail!(
            "{} invocation(s) failed; see the logs under {}",
            summary.utseg.failed + summary.morphotag.failed,
            outcome.layout.run_dir.display()
        );
    }

    Ok(())
}
