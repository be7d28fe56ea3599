//! Combiner: stitch enabled module fragments into one script.
//!
//! Shared boilerplate (context initializer, message-count alias,
//! `hourInRange`) is emitted exactly once up front; fragment bodies follow
//! in module order under banner comments. No-op fragments keep their notice
//! line in the output but do not count as active modules.

use tracing::{debug, info};

use crate::models::{GenOptions, Module, ModuleOrder, RuleSet};
use crate::ForgeError;

use super::runtime;
use super::build_fragment;

/// The combined script plus how many included modules actually emit logic.
#[derive(Debug, Clone)]
pub struct CombinedScript {
    pub text: String,
    pub active_modules: usize,
}

pub fn combine(
    order: &ModuleOrder,
    rules: &RuleSet,
    opts: &GenOptions,
) -> Result<CombinedScript, ForgeError> {
    if !order.any_enabled() {
        return Err(ForgeError::NoModulesEnabled);
    }
    let enabled: Vec<Module> = order.enabled().collect();

    let mut out = String::new();
    out.push_str("// ============================================\n");
    out.push_str("// COMBINED SCRIPT - All Enabled Modules\n");
    out.push_str("// Generated by Character Script Builder\n");
    out.push_str("// ============================================\n\n");

    out.push_str("// Shared initialization function\n");
    out.push_str(runtime::INIT_CONTEXT_FN);
    out.push('\n');
    out.push_str("// Initialize context\n");
    out.push_str("initContext();\n\n");

    if enabled.iter().any(|m| m.needs_message_count()) {
        out.push_str(&runtime::message_count_alias(
            "Safe message counter alias for pacing/combined modules",
        ));
    }
    if enabled.iter().any(|m| m.needs_hour_in_range()) {
        out.push_str(runtime::HOUR_IN_RANGE_FN);
        out.push('\n');
    }

    let mut active_modules = 0;
    for module in &enabled {
        let fragment = build_fragment(*module, rules, opts);
        if fragment.is_noop() {
            debug!(module = %module, "module has no usable rules, kept as notice only");
        } else {
            active_modules += 1;
        }
        out.push_str(&format!(
            "// ========== {} MODULE ==========\n",
            module.name().to_uppercase()
        ));
        out.push_str(fragment.body().trim());
        out.push_str("\n\n");
    }

    info!(
        enabled = enabled.len(),
        active = active_modules,
        "combined script generated"
    );
    Ok(CombinedScript {
        text: out,
        active_modules,
    })
}
