//! chabatch CLI — batch utterance segmentation and morphosyntactic tagging.
//!
//! Usage:
//!   chabatch run [DIRS]...    Run utseg then morphotag over transcript directories
//!   chabatch scan [DIRS]...   Count .cha files without invoking the tool
//!   chabatch check            Check that the tool and run directories are ready
//!   chabatch init             Write a default config file to edit

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "chabatch",
    about = "Batch morphosyntactic analysis of CHAT transcripts via batchalign",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the two-stage analysis over transcript directories
    Run {
        /// Input directories (defaults to the configured input_dirs)
        dirs: Vec<PathBuf>,

        /// Base directory for run output
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tool binary to invoke
        #[arg(long)]
        tool: Option<String>,

        /// Segmentation language code
        #[arg(long)]
        lang: Option<String>,

        /// Disable retokenization during tagging
        #[arg(long)]
        no_retokenize: bool,

        /// Per-invocation timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Count .cha files in transcript directories
    Scan {
        /// Directories to scan (defaults to the configured input_dirs)
        dirs: Vec<PathBuf>,
    },

    /// Check that the environment is ready for a run
    Check,

    /// Write a default config file to edit
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from the config, with --verbose taking precedence
    let mut logging = chabatch_common::config::AppConfig::load().logging;
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    chabatch_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Run {
            dirs,
            output,
            tool,
            lang,
            no_retokenize,
            timeout,
        } => commands::run::run(dirs, output, tool, lang, no_retokenize, timeout),
        Commands::Scan { dirs } => commands::scan::run(dirs),
        Commands::Check => commands::check::run(),
        Commands::Init { force } => commands::init::run(force),
    }
}
