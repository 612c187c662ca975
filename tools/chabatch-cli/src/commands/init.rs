//! Write a starter configuration file.

use chabatch_common::config::{config_file_path, AppConfig};

pub fn run(force: bool) -> anyhow::Result<()> {
    let path = config_file_path();

    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default().save()?;
    println!("Wrote default config to {}", path.display());
    println!("Edit input_dirs, output_base, and tool settings to taste.");

    Ok(())
}
