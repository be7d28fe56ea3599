//! Ambient generator: random flavor text.
//!
//! Every event carries its own probability (percent), defaulting to the
//! module-wide value. The generated code rolls once per evaluation and
//! fires the first event in declaration order whose probability covers the
//! roll, then breaks, so at most one ambient event fires per turn. An
//! earlier event with a large probability can starve later small ones that
//! share the same roll; rule order is the documented precedence knob.

use serde::Serialize;

use crate::models::{AmbientEvent, GenOptions, Module};

use super::fragment::{CodeBuf, Fragment};

#[derive(Serialize)]
struct EventEntry {
    probability: u8,
    content: String,
}

pub fn build(events: &[AmbientEvent], opts: &GenOptions) -> Fragment {
    let entries: Vec<EventEntry> = events
        .iter()
        .filter_map(|e| {
            e.usable().map(|content| EventEntry {
                probability: e.probability.unwrap_or(opts.ambient_probability),
                content: content.to_string(),
            })
        })
        .collect();

    if entries.is_empty() {
        return Fragment::noop(Module::Ambient);
    }

    let json = serde_json::to_string_pretty(&entries)
        .expect("ambient event list of plain values always serializes");

    let mut b = CodeBuf::new();
    b.line(&format!("var ambientEvents = {};", json));
    b.blank();
    b.line("var roll = Math.floor(Math.random() * 100) + 1;");
    b.line("var ambientFired = false;");
    b.blank();
    b.line("// First event in order whose probability covers the roll wins");
    b.line("for (var i = 0; i < ambientEvents.length; i++) {");
    b.line("  if (ambientEvents[i].probability >= roll) {");
    b.line("    context.character.scenario += '\\n' + ambientEvents[i].content;");
    b.line("    ambientFired = true;");
    b.line("    break;");
    b.line("  }");
    b.line("}");

    if opts.debug_mode {
        b.blank();
        b.line("if (ambientFired) {");
        b.line("  context.character.scenario += '\\n(debug: ambient event fired)';");
        b.line("}");
    }

    Fragment::new(Module::Ambient, b.finish())
}
