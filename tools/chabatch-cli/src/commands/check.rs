//! Check that the environment is ready for a batch run.

use chabatch_common::config::AppConfig;
use chabatch_pipeline::doctor::{all_required_available, check_capabilities, print_capability_report};

pub fn run() -> anyhow::Result<()> {
    let config = AppConfig::load();

    let capabilities = check_capabilities(&config);
    print_capability_report(&capabilities);

    println!();
    if all_required_available(&capabilities) {
        println!("All required prerequisites are available. chabatch is ready.");
        Ok(())
    } else {
        anyhow::bail!("Some required prerequisites are missing. See above for fixes.");
    }
}
