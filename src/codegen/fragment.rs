//! Fragment model: the structured intermediate between a module generator
//! and rendered script text.
//!
//! A fragment carries its body and helper needs separately, so the
//! standalone renderer and the combiner each assemble exactly the
//! boilerplate they want and no duplicate-helper stripping is ever needed.

use crate::models::Module;

use super::runtime;

/// A self-contained piece of generated script logic for one module.
#[derive(Debug, Clone)]
pub struct Fragment {
    module: Module,
    title: String,
    body: String,
    noop: bool,
}

impl Fragment {
    /// Fragment with runtime logic.
    pub fn new(module: Module, body: String) -> Self {
        Self {
            module,
            title: module.banner().to_string(),
            body,
            noop: false,
        }
    }

    /// Fragment with runtime logic and a custom header title (the scoring
    /// module includes its mode in the banner).
    pub fn with_title(module: Module, title: String, body: String) -> Self {
        Self {
            module,
            title,
            body,
            noop: false,
        }
    }

    /// No-op fragment for a module with zero usable rules. Its body is the
    /// fixed notice comment and nothing else.
    pub fn noop(module: Module) -> Self {
        Self {
            module,
            title: module.banner().to_string(),
            body: format!("{}\n", noop_notice(module)),
            noop: true,
        }
    }

    pub fn module(&self) -> Module {
        self.module
    }

    pub fn is_noop(&self) -> bool {
        self.noop
    }

    /// Runtime logic only, without header or boilerplate. For a no-op
    /// fragment this is the notice comment line.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Render as a standalone script: banner header, context initializer,
    /// whatever shared helpers this module needs, then the body.
    pub fn standalone(&self) -> String {
        let mut out = header(&self.title);
        if self.noop {
            out.push_str(&self.body);
            return out;
        }

        out.push_str("// Init function for standalone use\n");
        out.push_str(runtime::INIT_CONTEXT_FN);
        out.push_str("initContext();\n\n");

        if self.module.needs_message_count() {
            out.push_str(&runtime::message_count_alias(alias_comment(self.module)));
        }
        if self.module.needs_hour_in_range() {
            out.push_str(runtime::HOUR_IN_RANGE_FN);
            out.push('\n');
        }

        out.push_str(&self.body);
        out
    }
}

/// Standalone alias comment per module. Wordings are part of the frozen
/// output contract, like the no-op notices below.
fn alias_comment(module: Module) -> &'static str {
    match module {
        Module::Combined => "Safe message counter alias for combined conditions",
        _ => "Safe message counter alias for pacing module",
    }
}

fn header(title: &str) -> String {
    format!(
        "// ============================================\n// MODULE: {}\n// ============================================\n\n",
        title
    )
}

/// The fixed "does nothing" notice per module. Wordings are part of the
/// frozen output contract; downstream tooling pattern-matches them.
pub fn noop_notice(module: Module) -> &'static str {
    match module {
        Module::Lorebook => {
            "// (No lorebook entries configured — this module currently does nothing.)"
        }
        Module::Memory => {
            "// (No memory triggers configured — this module currently does nothing.)"
        }
        Module::Pacing => {
            "// (No pacing phases or events configured — this module currently does nothing.)"
        }
        Module::Tone => "// (No tone triggers configured — this module currently does nothing.)",
        Module::Time => "// (No time slots configured — this module currently does nothing.)",
        Module::Ambient => {
            "// (No ambient events configured — this module currently does nothing.)"
        }
        Module::Random => {
            "// (No random events configured — this module currently does nothing.)"
        }
        Module::Combined => {
            "// (No combined condition rules configured — this module currently does nothing.)"
        }
        Module::Scoring => {
            "// (No scoring keywords configured — this module currently does nothing.)"
        }
    }
}

/// Line-oriented buffer for generator bodies.
#[derive(Debug, Default)]
pub(crate) struct CodeBuf {
    out: String,
}

impl CodeBuf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line, newline added.
    pub fn line(&mut self, s: &str) {
        self.out.push_str(s);
        self.out.push('\n');
    }

    /// Append raw text without a trailing newline.
    pub fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    pub fn finish(self) -> String {
        self.out
    }
}
