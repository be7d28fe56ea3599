//! Handler for `scriptforge generate`.

use std::path::Path;

use anyhow::Result;
use serde_json::json;
use tracing::info;

use crate::cli::output::{output_json, print_success, print_warning, OutputMode};
use crate::codegen;
use crate::models::{Module, RulesFile};
use crate::ForgeError;

pub fn handle_generate(
    rules_path: &Path,
    module: Option<&str>,
    output: Option<&Path>,
    mode: OutputMode,
) -> Result<()> {
    let file = RulesFile::load(rules_path)?;

    let (script, active_modules) = match module {
        Some(name) => {
            let module = Module::parse(name)?;
            let fragment = codegen::build_fragment(module, &file.rules, &file.options);
            if fragment.is_noop() {
                print_warning(&format!(
                    "module '{}' has no usable rules; the script is a no-op",
                    module
                ));
            }
            (fragment.standalone(), None)
        }
        None => match codegen::combine(&file.module_order(), &file.rules, &file.options) {
            Ok(combined) => (combined.text, Some(combined.active_modules)),
            Err(ForgeError::NoModulesEnabled) => {
                // A warning, not a failure: nothing to combine is a
                // legitimate project state.
                print_warning("no modules enabled; nothing to generate");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        },
    };

    if let Some(out) = output {
        std::fs::write(out, &script)?;
        info!(path = %out.display(), bytes = script.len(), "script written");
        match mode {
            OutputMode::Json => output_json(&json!({
                "written": out,
                "bytes": script.len(),
                "active_modules": active_modules,
            })),
            OutputMode::Human => {
                print_success(&format!("Script written to {}", out.display()));
                if let Some(active) = active_modules {
                    println!("Active modules: {}", active);
                }
            }
        }
    } else {
        match mode {
            OutputMode::Json => output_json(&json!({
                "script": script,
                "active_modules": active_modules,
            })),
            OutputMode::Human => println!("{}", script),
        }
    }

    Ok(())
}
