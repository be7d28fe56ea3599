//! Random generator: trigger phrase picks one of several responses.
//!
//! The pick is uniform via `floor(random() * responses.length)`. Triggers
//! are independent; two matching phrases both fire in the same evaluation.

use crate::models::{GenOptions, Module, RandomEvent};
use crate::utils::escape::escape_for_script_literal;

use super::fragment::{CodeBuf, Fragment};
use super::runtime;

pub fn build(events: &[RandomEvent], opts: &GenOptions) -> Fragment {
    let usable: Vec<(String, Vec<String>)> = events.iter().filter_map(|e| e.usable()).collect();
    if usable.is_empty() {
        return Fragment::noop(Module::Random);
    }

    let mut b = CodeBuf::new();
    b.push(runtime::GET_MESSAGE);
    b.line("var msgLower = message.toLowerCase();");
    b.line("var randomFired = false;");
    b.blank();

    for (trigger, responses) in &usable {
        let list = serde_json::to_string(responses)
            .expect("response list of plain strings always serializes");
        b.line(&format!("// Random Event: {}", trigger));
        b.line(&format!(
            "if (msgLower.indexOf('{}') !== -1) {{",
            escape_for_script_literal(trigger)
        ));
        b.line(&format!("  var responses = {};", list));
        b.line("  var randomResponse = responses[Math.floor(Math.random() * responses.length)];");
        b.line("  context.character.personality += '\\n' + randomResponse;");
        b.line("  randomFired = true;");
        b.line("}");
        b.blank();
    }

    if opts.debug_mode {
        b.line("if (randomFired) {");
        b.line("  context.character.scenario += '\\n(debug: random event fired)';");
        b.line("}");
    }

    Fragment::new(Module::Random, b.finish())
}
