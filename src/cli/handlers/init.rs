//! Handler for `scriptforge init`.

use std::path::Path;

use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::cli::output::{output_json, print_success, OutputMode};
use crate::models::RulesFile;

pub fn handle_init(path: &Path, force: bool, mode: OutputMode) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "'{}' already exists (pass --force to overwrite)",
            path.display()
        );
    }

    let starter = RulesFile::starter_toml()?;
    std::fs::write(path, starter)?;
    info!(path = %path.display(), "starter rules file written");

    match mode {
        OutputMode::Json => output_json(&json!({ "written": path })),
        OutputMode::Human => print_success(&format!("Starter rules written to {}", path.display())),
    }
    Ok(())
}
