//! Pacing generator: message-count gates.
//!
//! One `if` per window, one per exact one-time event. Windows and events
//! are not mutually exclusive; several may fire on the same turn.

use crate::models::{GenOptions, Module, PacingRules};
use crate::utils::escape::escape_for_script_literal;

use super::fragment::{CodeBuf, Fragment};

pub fn build(rules: &PacingRules, opts: &GenOptions) -> Fragment {
    let phases: Vec<(i64, i64, &str)> = rules.phases.iter().filter_map(|p| p.usable()).collect();
    let events: Vec<(i64, &str)> = rules.events.iter().filter_map(|e| e.usable()).collect();

    if phases.is_empty() && events.is_empty() {
        return Fragment::noop(Module::Pacing);
    }

    let mut b = CodeBuf::new();
    b.line("var count = message_count;");
    b.line("var pacingSet = false;");
    b.blank();

    if !phases.is_empty() {
        b.line("// Message Count Phases");
        for (min, max, content) in &phases {
            b.line(&format!("if (count >= {} && count <= {}) {{", min, max));
            b.line(&format!(
                "  context.character.scenario += '\\n{}';",
                escape_for_script_literal(content)
            ));
            b.line("  pacingSet = true;");
            b.line("}");
        }
        b.blank();
    }

    if !events.is_empty() {
        b.line("// One-Time Events");
        for (exact, content) in &events {
            b.line(&format!("if (count === {}) {{", exact));
            b.line(&format!(
                "  context.character.scenario += '\\n{}';",
                escape_for_script_literal(content)
            ));
            b.line("  pacingSet = true;");
            b.line("}");
        }
    }

    if opts.debug_mode {
        b.blank();
        b.line("if (pacingSet) {");
        b.line("  context.character.scenario += '\\n(debug: pacing fired, message_count=' + count + ')';");
        b.line("}");
    }

    Fragment::new(Module::Pacing, b.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExactTrigger, RangeRule};

    #[test]
    fn test_no_rules_is_noop() {
        let frag = build(&PacingRules::default(), &GenOptions::default());
        assert!(frag.is_noop());
    }

    #[test]
    fn test_incomplete_rows_excluded() {
        let rules = PacingRules {
            phases: vec![RangeRule {
                min: Some(1),
                max: None,
                content: "x".into(),
            }],
            events: vec![ExactTrigger {
                message_number: None,
                content: "y".into(),
            }],
        };
        assert!(build(&rules, &GenOptions::default()).is_noop());
    }

    #[test]
    fn test_windows_and_events_emit_independent_ifs() {
        let rules = PacingRules {
            phases: vec![RangeRule {
                min: Some(1),
                max: Some(10),
                content: "early game".into(),
            }],
            events: vec![ExactTrigger {
                message_number: Some(5),
                content: "the twist".into(),
            }],
        };
        let frag = build(&rules, &GenOptions::default());
        let body = frag.body();
        assert!(body.contains("if (count >= 1 && count <= 10) {"));
        assert!(body.contains("if (count === 5) {"));
        assert!(body.contains("\\nearly game"));
        assert!(body.contains("\\nthe twist"));
    }
}
