//! Main entry point for the vx-tui binary.
//!
//! Runs the campaign form against the configuration in the current
//! directory. The `vaxsearch` binary in vx-cli adds flags and logging.

use anyhow::Result;
use std::path::Path;
use vx_core::config::loader::load_config;
use vx_tui::run_app;

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config(Path::new(".")).await?;
    if let Some(draft) = run_app(&config).await? {
        println!("{}", draft.to_pretty_json()?);
    }
    Ok(())
}
